//! Roster admin library
//!
//! This crate contains the admin client's library surfaces used by the
//! executable in `src/main.rs`: the REST client for the user service, the
//! role-aware user dialogs, and the polling user table.
//!
//! Notes
//! - Public items are subject to change while the panel stabilizes.
//! - Most consumers should use the `roster-admin` binary; the library is
//!   exposed mainly to enable testing against the in-memory service stub.

pub mod app;
/// Core module declaration as library to enable utilizing application modules for testing
pub mod common;
pub mod domains;
pub mod infra;
pub mod state;
pub mod subscriptions;
pub mod update;
pub mod view;
