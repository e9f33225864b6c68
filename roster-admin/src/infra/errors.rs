//! Client error types
//!
//! Every REST call funnels its failure into [`ClientError`]. The modal
//! controllers only care about one distinction: did the server answer with
//! an error envelope ([`ClientError::Api`]) that can be shown field by field,
//! or did the exchange itself fail (everything else)?

use reqwest::StatusCode;
use roster_model::ErrorBody;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status.
    ///
    /// `body` is the decoded error envelope, or [`ErrorBody::generic`] when
    /// the body could not be understood.
    #[error("Request failed with status {status}: {body}")]
    Api { status: StatusCode, body: ErrorBody },

    /// Connection, TLS or protocol failure before a status was received.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body did not match the expected shape.
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    pub fn api(status: StatusCode, body: ErrorBody) -> Self {
        ClientError::Api { status, body }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// The server's error envelope, when there is one to render.
    pub fn error_body(&self) -> Option<&ErrorBody> {
        match self {
            ClientError::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_exposes_envelope() {
        let err = ClientError::api(
            StatusCode::BAD_REQUEST,
            ErrorBody::with_message("Validation failed").with_field_error("email", "taken"),
        );
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            err.error_body().and_then(|b| b.errors.get("email")).map(String::as_str),
            Some("taken")
        );
        assert!(err.to_string().starts_with("Request failed with status 400"));
    }

    #[test]
    fn decode_error_has_no_envelope() {
        let err: ClientError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(err.error_body().is_none());
        assert!(err.status().is_none());
    }
}
