use roster_model::{User, UserId};

use super::form::FieldEdit;
use crate::infra::errors::ClientResult;

#[derive(Debug)]
pub enum Message {
    // User creation
    OpenNew,
    NewForm(FieldEdit),
    SubmitNew,
    NewSubmitted(ClientResult<User>),
    CloseNew,

    // User updates
    OpenEdit(UserId),
    EditLoaded(ClientResult<User>),
    EditForm(FieldEdit),
    SubmitEdit,
    EditSubmitted(ClientResult<User>),
    CloseEdit,

    // User deletion
    OpenDelete { id: UserId, name: String },
    ConfirmDelete,
    DeleteSubmitted(ClientResult<UserId>),
    CancelDelete,
}

impl Message {
    /// Returns a sanitized display string that hides sensitive credential data
    pub fn sanitized_display(&self) -> String {
        match self {
            Self::NewForm(FieldEdit::Password(_)) => "NewForm(Password(***))".to_string(),
            Self::EditForm(FieldEdit::Password(_)) => "EditForm(Password(***))".to_string(),
            _ => format!("{:?}", self),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            // User creation
            Self::OpenNew => "Modals::OpenNew",
            Self::NewForm(_) => "Modals::NewForm",
            Self::SubmitNew => "Modals::SubmitNew",
            Self::NewSubmitted(_) => "Modals::NewSubmitted",
            Self::CloseNew => "Modals::CloseNew",

            // User updates
            Self::OpenEdit(_) => "Modals::OpenEdit",
            Self::EditLoaded(_) => "Modals::EditLoaded",
            Self::EditForm(_) => "Modals::EditForm",
            Self::SubmitEdit => "Modals::SubmitEdit",
            Self::EditSubmitted(_) => "Modals::EditSubmitted",
            Self::CloseEdit => "Modals::CloseEdit",

            // User deletion
            Self::OpenDelete { .. } => "Modals::OpenDelete",
            Self::ConfirmDelete => "Modals::ConfirmDelete",
            Self::DeleteSubmitted(_) => "Modals::DeleteSubmitted",
            Self::CancelDelete => "Modals::CancelDelete",
        }
    }
}
