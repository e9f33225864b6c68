pub mod modals;
pub mod profile;
pub mod roles;
pub mod users;
