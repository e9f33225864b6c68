use std::time::Duration;

use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder, Response};
use roster_model::ErrorBody;
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::infra::errors::{ClientError, ClientResult};

/// Thin JSON client for the user service.
///
/// Every call issues exactly one request. Nothing is retried and, unless a
/// timeout is configured, a hung request stays pending.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: Url,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl ApiClient {
    /// Create a new API client without a request timeout
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> ClientResult<Self> {
        let base_url = Url::parse(base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        info!("[ApiClient] Creating API client with base URL: {}", base_url);

        Ok(Self { client, base_url })
    }

    /// Join a route onto the base URL, keeping any path prefix the base has.
    pub fn build_url(&self, path: impl AsRef<str>) -> ClientResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.as_ref().trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Send the request and decode a JSON success body.
    async fn execute_request<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send the request and discard whatever success body comes back.
    async fn execute_no_content(&self, request: RequestBuilder) -> ClientResult<()> {
        let response = request.send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Map any non-2xx response to [`ClientError::Api`].
    async fn check_status(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().clone();
        let body = match response.bytes().await {
            Ok(bytes) => decode_error_body(&bytes),
            Err(err) => {
                debug!("[ApiClient] Failed to read error body from {}: {}", url, err);
                ErrorBody::generic()
            }
        };
        warn!("[ApiClient] {} returned {}: {}", url, status, body);
        Err(ClientError::api(status, body))
    }

    /// GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.build_url(path)?;
        debug!("GET request to: {}", url);
        self.execute_request(self.client.get(url)).await
    }

    /// POST request with a JSON body
    pub async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<R> {
        let url = self.build_url(path)?;
        debug!("POST request to: {}", url);
        self.execute_request(self.client.post(url).json(body)).await
    }

    /// PUT request with a JSON body
    pub async fn put<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<R> {
        let url = self.build_url(path)?;
        debug!("PUT request to: {}", url);
        self.execute_request(self.client.put(url).json(body)).await
    }

    /// DELETE request; the response body is ignored
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let url = self.build_url(path)?;
        debug!("DELETE request to: {}", url);
        self.execute_no_content(self.client.delete(url)).await
    }
}

/// Decode the server's error envelope, falling back to the generic message
/// when the body is not JSON or carries nothing displayable.
fn decode_error_body(bytes: &[u8]) -> ErrorBody {
    match serde_json::from_slice::<ErrorBody>(bytes) {
        Ok(body) if body.message.is_some() || body.has_field_errors() => body,
        Ok(_) => ErrorBody::generic(),
        Err(err) => {
            debug!("[ApiClient] Unparsable error body: {}", err);
            ErrorBody::generic()
        }
    }
}
