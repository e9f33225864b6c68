use std::sync::Arc;

use roster_model::{Role, User};

use crate::domains::modals::{DeleteModal, UserModal};
use crate::domains::roles::ChecklistScope;
use crate::infra::services::user_admin::UserAdminService;

/// Which load produced a panel notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSource {
    Roles,
    Users,
    EditFetch,
}

/// Panel-level problem that belongs to no dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub source: NoticeSource,
    pub message: String,
}

/// Everything the admin view is rendered from.
///
/// The lists are disposable copies of server state and are replaced
/// wholesale by every fetch.
pub struct AdminState {
    pub service: Arc<dyn UserAdminService>,
    pub roles: Vec<Role>,
    pub users: Vec<User>,
    pub current_user: Option<User>,
    pub new_user: UserModal,
    pub edit_user: UserModal,
    pub delete_user: DeleteModal,
    /// Latest failed load, cleared when the same load next succeeds.
    pub notice: Option<Notice>,
}

impl AdminState {
    pub fn new(service: Arc<dyn UserAdminService>) -> Self {
        Self {
            service,
            roles: Vec::new(),
            users: Vec::new(),
            current_user: None,
            new_user: UserModal::closed(ChecklistScope::New),
            edit_user: UserModal::closed(ChecklistScope::Edit),
            delete_user: DeleteModal::default(),
            notice: None,
        }
    }

    pub fn set_notice(&mut self, source: NoticeSource, message: impl Into<String>) {
        self.notice = Some(Notice {
            source,
            message: message.into(),
        });
    }

    /// Drop the notice if `source` raised it; other notices stay.
    pub fn clear_notice_from(&mut self, source: NoticeSource) {
        if self
            .notice
            .as_ref()
            .is_some_and(|notice| notice.source == source)
        {
            self.notice = None;
        }
    }
}

impl std::fmt::Debug for AdminState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminState")
            .field("roles", &self.roles.len())
            .field("users", &self.users.len())
            .field(
                "current_user",
                &self.current_user.as_ref().map(|user| &user.email),
            )
            .field("new_user", &self.new_user.phase)
            .field("edit_user", &self.edit_user.phase)
            .field("delete_user", &self.delete_user.phase)
            .field("notice", &self.notice.as_ref().map(|notice| &notice.message))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::testing::TestApiService;

    #[test]
    fn notice_is_cleared_only_by_its_source() {
        let mut state = AdminState::new(Arc::new(TestApiService::new()));
        state.set_notice(NoticeSource::Users, "Could not load users: down");

        state.clear_notice_from(NoticeSource::Roles);
        assert!(state.notice.is_some());

        state.clear_notice_from(NoticeSource::Users);
        assert_eq!(state.notice, None);
    }
}
