//! Request-count guarantees, checked with a strict mock of the service seam.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::eq;
use roster_admin::app::AdminPanel;
use roster_admin::domains::modals::form::FieldEdit;
use roster_admin::domains::modals::{AT_LEAST_ONE_ROLE, ModalMessage};
use roster_admin::domains::profile::ProfilePage;
use roster_admin::domains::users::RowAction;
use roster_admin::infra::errors::ClientResult;
use roster_admin::infra::services::UserAdminService;
use roster_model::{Role, User, UserId, UserPayload};

mock! {
    pub Service {}

    #[async_trait]
    impl UserAdminService for Service {
        async fn list_roles(&self) -> ClientResult<Vec<Role>>;
        async fn list_users(&self) -> ClientResult<Vec<User>>;
        async fn get_user(&self, id: UserId) -> ClientResult<User>;
        async fn create_user(&self, payload: UserPayload) -> ClientResult<User>;
        async fn update_user(&self, id: UserId, payload: UserPayload) -> ClientResult<User>;
        async fn delete_user(&self, id: UserId) -> ClientResult<()>;
        async fn current_user(&self) -> ClientResult<User>;
    }
}

fn admin() -> User {
    User {
        id: UserId(1),
        name: "admin".into(),
        age: 40,
        email: "admin@example.com".into(),
        roles: vec!["ROLE_ADMIN".into()],
    }
}

/// A mock that serves the initial load and nothing else.
fn loaded_service() -> MockService {
    let mut service = MockService::new();
    service
        .expect_list_roles()
        .times(1)
        .returning(|| Ok(vec![Role::new("ROLE_ADMIN"), Role::new("ROLE_USER")]));
    service
        .expect_list_users()
        .times(1)
        .returning(|| Ok(vec![admin()]));
    service
        .expect_current_user()
        .times(1)
        .returning(|| Ok(admin()));
    service
}

#[tokio::test]
async fn zero_role_submit_never_reaches_the_service() {
    let mut service = loaded_service();
    service.expect_create_user().never();
    service.expect_update_user().never();
    let panel = AdminPanel::new(Arc::new(service));
    panel.init().await;

    panel.dispatch(ModalMessage::OpenNew.into()).await;
    for edit in [
        FieldEdit::Name("omar".into()),
        FieldEdit::Age("28".into()),
        FieldEdit::Email("omar@example.com".into()),
        FieldEdit::Password("long-enough".into()),
        // checked then unchecked again
        FieldEdit::ToggleRole("ROLE_USER".into()),
        FieldEdit::ToggleRole("ROLE_USER".into()),
    ] {
        panel.dispatch(ModalMessage::NewForm(edit).into()).await;
    }
    panel.dispatch(ModalMessage::SubmitNew.into()).await;

    let view = panel.view().await;
    let modal = view.new_modal.expect("open");
    assert_eq!(modal.errors.global.as_deref(), Some(AT_LEAST_ONE_ROLE));
}

#[tokio::test]
async fn edit_issues_one_fetch_and_cancelled_delete_none() {
    let mut service = loaded_service();
    service
        .expect_get_user()
        .with(eq(UserId(1)))
        .times(1)
        .returning(|_| Ok(admin()));
    service.expect_delete_user().never();
    let panel = AdminPanel::new(Arc::new(service));
    panel.init().await;

    panel.dispatch(RowAction::Edit { id: UserId(1) }.into()).await;
    panel.dispatch(ModalMessage::CloseEdit.into()).await;

    panel
        .dispatch(
            RowAction::Delete {
                id: UserId(1),
                name: "admin".into(),
            }
            .into(),
        )
        .await;
    panel.dispatch(ModalMessage::CancelDelete.into()).await;

    let view = panel.view().await;
    assert!(view.edit_modal.is_none());
    assert!(view.delete_modal.is_none());
}

#[tokio::test]
async fn profile_makes_exactly_one_request() {
    let mut service = MockService::new();
    service
        .expect_current_user()
        .times(1)
        .returning(|| Ok(admin()));

    let profile = ProfilePage::load(&service).await.unwrap();
    assert_eq!(profile.email, "admin@example.com");
    assert_eq!(profile.roles, "ADMIN");
    assert_eq!(profile.table.len(), 1);
}
