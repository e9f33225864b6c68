//! REST routes of the user service
//!
//! Paths are relative to the configured server URL.

/// Role catalogue
pub mod roles {
    /// List every role
    pub const LIST: &str = "/api/roles";
}

/// User management endpoints
pub mod users {
    /// List users (GET) and create a user (POST)
    pub const COLLECTION: &str = "/api/users";
    /// Fetch (GET), replace (PUT) or delete (DELETE) one user
    pub const ITEM: &str = "/api/users/{id}";
}

/// Authentication endpoints
pub mod auth {
    /// The authenticated user behind the current session
    pub const CURRENT_USER: &str = "/api/auth/user";
}

pub mod utils {
    /// Substitutes a `{name}` placeholder in a route template.
    pub fn replace_param(route: &str, param: &str, value: impl AsRef<str>) -> String {
        route.replace(param, value.as_ref())
    }
}
