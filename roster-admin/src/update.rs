use log::{debug, error, info, warn};

use crate::common::{Message, Task};
use crate::domains::modals::update::update_modals;
use crate::state::{AdminState, NoticeSource};

/// Single reducer for the admin panel.
///
/// Never awaits: requests are returned as a [`Task`] and their results come
/// back as messages.
pub fn update(state: &mut AdminState, message: Message) -> Task<Message> {
    debug!("Admin update: {}", message.name());

    match message {
        Message::LoadRoles => {
            let service = state.service.clone();
            Task::perform(
                async move { service.list_roles().await },
                Message::RolesLoaded,
            )
        }

        Message::RolesLoaded(Ok(roles)) => {
            info!("Loaded {} roles", roles.len());
            state.roles = roles;
            state.clear_notice_from(NoticeSource::Roles);
            Task::none()
        }

        Message::RolesLoaded(Err(err)) => {
            error!("Failed to load roles: {}", err);
            state.set_notice(NoticeSource::Roles, format!("Could not load roles: {err}"));
            Task::none()
        }

        Message::RefreshUsers => {
            let service = state.service.clone();
            Task::perform(
                async move { service.list_users().await },
                Message::UsersLoaded,
            )
        }

        Message::UsersLoaded(Ok(users)) => {
            debug!("Loaded {} users", users.len());
            state.users = users;
            state.clear_notice_from(NoticeSource::Users);
            Task::none()
        }

        Message::UsersLoaded(Err(err)) => {
            warn!("Failed to load users: {}", err);
            state.set_notice(NoticeSource::Users, format!("Could not load users: {err}"));
            Task::none()
        }

        Message::LoadCurrentUser => {
            let service = state.service.clone();
            Task::perform(
                async move { service.current_user().await },
                Message::CurrentUserLoaded,
            )
        }

        Message::CurrentUserLoaded(Ok(user)) => {
            state.current_user = Some(user);
            Task::none()
        }

        Message::CurrentUserLoaded(Err(err)) => {
            warn!("Failed to load current user: {}", err);
            Task::none()
        }

        Message::Modal(message) => update_modals(state, message),

        Message::DismissNotice => {
            state.notice = None;
            Task::none()
        }
    }
}
