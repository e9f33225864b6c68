//! Infrastructure: HTTP access to the user service and its test doubles.

pub mod api_client;
pub mod constants;
pub mod errors;
pub mod services;
pub mod testing;

pub use api_client::ApiClient;
pub use errors::{ClientError, ClientResult};
