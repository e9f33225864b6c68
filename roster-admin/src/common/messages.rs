//! Root message type
//!
//! Every user intent, timer tick and request result reaches the reducer as a
//! [`Message`].

use roster_model::{Role, User};

use crate::domains::modals::ModalMessage;
use crate::domains::users::RowAction;
use crate::infra::errors::ClientResult;

#[derive(Debug)]
pub enum Message {
    // Role catalogue
    LoadRoles,
    RolesLoaded(ClientResult<Vec<Role>>),

    // User list
    RefreshUsers,
    UsersLoaded(ClientResult<Vec<User>>),

    // Session user
    LoadCurrentUser,
    CurrentUserLoaded(ClientResult<User>),

    // Dialogs
    Modal(ModalMessage),

    DismissNotice,
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadRoles => "Admin::LoadRoles",
            Self::RolesLoaded(_) => "Admin::RolesLoaded",
            Self::RefreshUsers => "Admin::RefreshUsers",
            Self::UsersLoaded(_) => "Admin::UsersLoaded",
            Self::LoadCurrentUser => "Admin::LoadCurrentUser",
            Self::CurrentUserLoaded(_) => "Admin::CurrentUserLoaded",
            Self::Modal(inner) => inner.name(),
            Self::DismissNotice => "Admin::DismissNotice",
        }
    }

    /// Debug representation safe for logs.
    pub fn sanitized_display(&self) -> String {
        match self {
            Self::Modal(inner) => format!("Modal({})", inner.sanitized_display()),
            _ => format!("{:?}", self),
        }
    }
}

impl From<ModalMessage> for Message {
    fn from(message: ModalMessage) -> Self {
        Message::Modal(message)
    }
}

/// Row controls dispatch straight into the dialogs.
impl From<RowAction> for Message {
    fn from(action: RowAction) -> Self {
        match action {
            RowAction::Edit { id } => ModalMessage::OpenEdit(id).into(),
            RowAction::Delete { id, name } => ModalMessage::OpenDelete { id, name }.into(),
        }
    }
}
