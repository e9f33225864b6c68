//! Self-profile page
//!
//! Fetches the session user once and renders it. No polling, no actions.

use std::fmt;

use log::info;
use roster_model::User;

use crate::domains::users::{UserRow, UserTable};
use crate::infra::errors::ClientResult;
use crate::infra::services::user_admin::UserAdminService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub email: String,
    /// Role labels without prefix, comma-joined.
    pub roles: String,
    /// Exactly one read-only row.
    pub table: UserTable,
}

impl ProfileView {
    pub fn render(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            roles: user.role_labels(),
            table: UserTable {
                rows: vec![UserRow::read_only(user)],
            },
        }
    }
}

impl fmt::Display for ProfileView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} with roles: {}", self.email, self.roles)?;
        writeln!(f)?;
        write!(f, "{}", self.table)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProfilePage;

impl ProfilePage {
    /// One request to the current-user endpoint.
    pub async fn load(service: &dyn UserAdminService) -> ClientResult<ProfileView> {
        let user = service.current_user().await?;
        info!("Loaded profile for {}", user.email);
        Ok(ProfileView::render(&user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::testing::{ApiOperation, TestApiService};

    #[tokio::test]
    async fn renders_single_row_with_one_request() {
        let api = TestApiService::new();
        let view = ProfilePage::load(&api).await.unwrap();

        assert_eq!(view.email, "admin@example.com");
        assert_eq!(view.roles, "ADMIN, USER");
        assert_eq!(view.table.len(), 1);
        assert!(view.table.rows[0].actions.is_empty());
        assert_eq!(api.calls().len(), 1);
        assert_eq!(api.count(ApiOperation::CurrentUser), 1);
        assert!(view.to_string().starts_with("admin@example.com with roles: ADMIN, USER\n"));
    }

    #[tokio::test]
    async fn propagates_missing_session() {
        let api = TestApiService::new();
        api.set_current_user(None);
        let err = ProfilePage::load(&api).await.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
    }
}
