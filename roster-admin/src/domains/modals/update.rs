use log::{debug, error, info, warn};
use roster_model::{User, UserPayload};

use super::form::{FormErrors, UserForm};
use super::messages::Message;
use super::{AT_LEAST_ONE_ROLE, DeleteTarget, ModalPhase, NETWORK_ERROR, UserModal};
use crate::common::{Message as AppMessage, Task};
use crate::domains::roles::ChecklistScope;
use crate::infra::errors::{ClientError, ClientResult};
use crate::state::{AdminState, NoticeSource};

/// Handle dialog messages
pub fn update_modals(state: &mut AdminState, message: Message) -> Task<AppMessage> {
    debug!("Modal update: {}", message.name());

    match message {
        // User creation
        Message::OpenNew => {
            if state.new_user.phase == ModalPhase::Submitting {
                warn!("Ignoring open while a new user is being submitted");
                return Task::none();
            }
            info!("Opening new user dialog");
            let form = UserForm::blank(ChecklistScope::New, &state.roles);
            state.new_user.open_with(form);
            Task::none()
        }

        Message::NewForm(edit) => {
            if state.new_user.phase == ModalPhase::Open {
                state.new_user.form.apply(edit);
            }
            Task::none()
        }

        Message::SubmitNew => {
            let Some(payload) = begin_submit(&mut state.new_user, "new") else {
                return Task::none();
            };
            info!("Submitting new user {}", payload.email);
            let service = state.service.clone();
            Task::perform(
                async move { service.create_user(payload).await },
                |result| Message::NewSubmitted(result).into(),
            )
        }

        Message::NewSubmitted(result) => finish_submit(&mut state.new_user, result, "create"),

        Message::CloseNew => {
            state.new_user.close();
            Task::none()
        }

        // User updates
        Message::OpenEdit(id) => {
            info!("Loading user {} for edit", id);
            let service = state.service.clone();
            Task::perform(
                async move { service.get_user(id).await },
                |result| Message::EditLoaded(result).into(),
            )
        }

        Message::EditLoaded(Ok(user)) => {
            if state.edit_user.phase == ModalPhase::Submitting {
                warn!(
                    "Ignoring loaded user {} while an edit is being submitted",
                    user.id
                );
                return Task::none();
            }
            state.clear_notice_from(NoticeSource::EditFetch);
            let form = UserForm::from_user(&user, &state.roles);
            state.edit_user.open_with(form);
            Task::none()
        }

        Message::EditLoaded(Err(err)) => {
            error!("Failed to load user for edit: {}", err);
            state.set_notice(NoticeSource::EditFetch, format!("Could not load user: {err}"));
            Task::none()
        }

        Message::EditForm(edit) => {
            if state.edit_user.phase == ModalPhase::Open {
                state.edit_user.form.apply(edit);
            }
            Task::none()
        }

        Message::SubmitEdit => {
            let Some(id) = state.edit_user.form.id else {
                warn!("Edit submitted without a user id");
                return Task::none();
            };
            let Some(payload) = begin_submit(&mut state.edit_user, "edit") else {
                return Task::none();
            };
            info!("Submitting update for user {}", id);
            let service = state.service.clone();
            Task::perform(
                async move { service.update_user(id, payload).await },
                |result| Message::EditSubmitted(result).into(),
            )
        }

        Message::EditSubmitted(result) => finish_submit(&mut state.edit_user, result, "update"),

        Message::CloseEdit => {
            state.edit_user.close();
            Task::none()
        }

        // User deletion
        Message::OpenDelete { id, name } => {
            if state.delete_user.phase == ModalPhase::Submitting {
                warn!("Ignoring delete of user {} while another delete is in flight", id);
                return Task::none();
            }
            info!("Requesting deletion confirmation for user {}", id);
            let details = state.users.iter().find(|user| user.id == id).cloned();
            let modal = &mut state.delete_user;
            modal.target = Some(DeleteTarget::new(id, name, details, &state.roles));
            modal.error = None;
            modal.phase = ModalPhase::Open;
            Task::none()
        }

        Message::ConfirmDelete => {
            let modal = &mut state.delete_user;
            let Some(id) = modal.target.as_ref().map(|target| target.id) else {
                debug!("Delete confirmed with no target");
                return Task::none();
            };
            if modal.phase != ModalPhase::Open {
                debug!("Ignoring delete confirmation in phase {:?}", modal.phase);
                return Task::none();
            }
            modal.phase = ModalPhase::Submitting;
            modal.error = None;
            info!("Deleting user {}", id);
            let service = state.service.clone();
            Task::perform(
                async move { service.delete_user(id).await.map(|_| id) },
                |result| Message::DeleteSubmitted(result).into(),
            )
        }

        Message::DeleteSubmitted(result) => {
            let modal = &mut state.delete_user;
            let current = modal.phase == ModalPhase::Submitting;
            match result {
                Ok(id) => {
                    info!("User deleted successfully: {}", id);
                    if current {
                        modal.close();
                    }
                    Task::done(AppMessage::RefreshUsers)
                }
                Err(err) => {
                    error!("Failed to delete user: {}", err);
                    if current {
                        modal.phase = ModalPhase::Open;
                        modal.error = Some(global_message(&err).to_string());
                    }
                    Task::none()
                }
            }
        }

        Message::CancelDelete => {
            info!("User deletion cancelled");
            state.delete_user.close();
            Task::none()
        }
    }
}

/// Client-side checks before a create or update. Returns the payload to
/// send, or `None` when nothing should be sent.
fn begin_submit(modal: &mut UserModal, which: &str) -> Option<UserPayload> {
    if modal.phase != ModalPhase::Open {
        debug!("Ignoring {} submit in phase {:?}", which, modal.phase);
        return None;
    }

    modal.errors.clear();
    if !modal.form.roles.has_checked() {
        modal.errors = FormErrors::global(AT_LEAST_ONE_ROLE);
        return None;
    }

    modal.phase = ModalPhase::Submitting;
    Some(modal.form.to_payload())
}

/// Apply a create/update result. A result that arrives after the dialog was
/// closed leaves the dialog alone; a success still refreshes the list.
fn finish_submit(modal: &mut UserModal, result: ClientResult<User>, what: &str) -> Task<AppMessage> {
    let current = modal.phase == ModalPhase::Submitting;
    if !current {
        debug!("Dropping stale {} result for a closed dialog", what);
    }

    match result {
        Ok(user) => {
            info!("User {} succeeded: {} ({})", what, user.name, user.id);
            if current {
                modal.close();
                modal.form.reset();
            }
            Task::done(AppMessage::RefreshUsers)
        }
        Err(err) => {
            warn!("User {} failed: {}", what, err);
            if current {
                modal.phase = ModalPhase::Open;
                modal.errors = match &err {
                    ClientError::Api { body, .. } => FormErrors::from_body(body),
                    _ => FormErrors::global(NETWORK_ERROR),
                };
            }
            Task::none()
        }
    }
}

fn global_message(err: &ClientError) -> &str {
    err.error_body()
        .and_then(|body| body.message.as_deref())
        .unwrap_or(NETWORK_ERROR)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use roster_model::{Role, UserId};

    use super::*;
    use crate::domains::modals::form::FieldEdit;
    use crate::infra::testing::{ApiOperation, TestApiService, sample_user};

    fn state_with(api: &TestApiService) -> AdminState {
        let mut state = AdminState::new(Arc::new(api.clone()));
        state.roles = vec![Role::new("ROLE_ADMIN"), Role::new("ROLE_USER")];
        state.users = api.users();
        state
    }

    async fn settle(state: &mut AdminState, task: Task<AppMessage>) {
        for message in task.run().await {
            let follow_up = crate::update::update(state, message);
            drop(follow_up);
        }
    }

    #[tokio::test]
    async fn reopening_new_during_submit_keeps_the_request() {
        let api = TestApiService::new();
        let mut state = state_with(&api);

        let _ = update_modals(&mut state, Message::OpenNew);
        for edit in [
            FieldEdit::Name("pat".into()),
            FieldEdit::Age("5".into()),
            FieldEdit::Email("bad".into()),
            FieldEdit::ToggleRole("ROLE_USER".into()),
        ] {
            let _ = update_modals(&mut state, Message::NewForm(edit));
        }
        let pending = update_modals(&mut state, Message::SubmitNew);

        assert!(update_modals(&mut state, Message::OpenNew).is_none());
        assert_eq!(state.new_user.phase, ModalPhase::Submitting);
        assert_eq!(state.new_user.form.name, "pat");

        settle(&mut state, pending).await;
        assert_eq!(state.new_user.phase, ModalPhase::Open);
        assert_eq!(
            state.new_user.errors.field("age"),
            Some("Age must be at least 12")
        );
        assert_eq!(
            state.new_user.errors.field("email"),
            Some("Invalid email format")
        );
    }

    #[tokio::test]
    async fn opening_delete_during_submit_keeps_the_target() {
        let api = TestApiService::new();
        api.push_user(sample_user(2, "quinn", &["ROLE_USER"]));
        let mut state = state_with(&api);

        let _ = update_modals(
            &mut state,
            Message::OpenDelete {
                id: UserId(2),
                name: "quinn".into(),
            },
        );
        let pending = update_modals(&mut state, Message::ConfirmDelete);

        let task = update_modals(
            &mut state,
            Message::OpenDelete {
                id: UserId(1),
                name: "admin".into(),
            },
        );
        assert!(task.is_none());
        assert_eq!(state.delete_user.phase, ModalPhase::Submitting);
        assert_eq!(
            state.delete_user.target.as_ref().map(|target| target.id),
            Some(UserId(2))
        );

        settle(&mut state, pending).await;
        assert!(!state.delete_user.is_visible());
        assert_eq!(api.count(ApiOperation::DeleteUser), 1);
        assert!(api.users().iter().all(|user| user.id != UserId(2)));
    }
}
