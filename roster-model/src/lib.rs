//! Core data model definitions shared by the Roster crates.
//!
//! Everything here mirrors the JSON exchanged with the user administration
//! backend. The types are plain data: the server owns every entity and the
//! client only keeps disposable copies for rendering.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod role;
pub mod user;

pub use error::{ErrorBody, ModelError, Result as ModelResult};
pub use ids::UserId;
pub use role::{ROLE_PREFIX, Role, join_role_labels, role_label};
pub use user::{User, UserPayload};
