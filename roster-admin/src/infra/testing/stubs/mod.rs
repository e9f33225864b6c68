pub mod api;

pub use api::{ApiCall, ApiOperation, TestApiService};
