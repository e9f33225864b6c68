//! Test doubles for the user service.
//!
//! [`TestApiService`] keeps users and roles in memory and answers with the
//! same validation envelopes as the backend, so controller flows can be
//! exercised end to end without a network.

pub mod stubs;

pub use stubs::api::{sample_user, valid_payload};
pub use stubs::{ApiCall, ApiOperation, TestApiService};
