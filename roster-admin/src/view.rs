//! Pure rendering of [`AdminState`] into a view description.

use std::fmt;

use roster_model::UserId;

use crate::domains::modals::form::FormErrors;
use crate::domains::modals::{DeleteTarget, ModalPhase, UserModal};
use crate::domains::roles::RoleChecklist;
use crate::domains::users::{UserTable, render_user_table};
use crate::state::AdminState;

/// Navbar identity of the session user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub email: String,
    pub roles: String,
}

/// An open New or Edit dialog. The password is never echoed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserModalView {
    pub phase: ModalPhase,
    pub id: Option<UserId>,
    pub name: String,
    pub age: String,
    pub email: String,
    pub roles: RoleChecklist,
    pub errors: FormErrors,
}

impl UserModalView {
    fn render(modal: &UserModal) -> Option<Self> {
        if !modal.is_visible() {
            return None;
        }
        Some(Self {
            phase: modal.phase,
            id: modal.form.id,
            name: modal.form.name.clone(),
            age: modal.form.age.clone(),
            email: modal.form.email.clone(),
            roles: modal.form.roles.clone(),
            errors: modal.errors.clone(),
        })
    }

    /// Inline message for one input, if it was marked invalid.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.field(field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteModalView {
    pub phase: ModalPhase,
    pub target: DeleteTarget,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminView {
    pub header: Option<HeaderView>,
    pub table: UserTable,
    pub new_modal: Option<UserModalView>,
    pub edit_modal: Option<UserModalView>,
    pub delete_modal: Option<DeleteModalView>,
    pub notice: Option<String>,
}

pub fn view(state: &AdminState) -> AdminView {
    let delete_modal = match (&state.delete_user.target, state.delete_user.is_visible()) {
        (Some(target), true) => Some(DeleteModalView {
            phase: state.delete_user.phase,
            target: target.clone(),
            error: state.delete_user.error.clone(),
        }),
        _ => None,
    };

    AdminView {
        header: state.current_user.as_ref().map(|user| HeaderView {
            email: user.email.clone(),
            roles: user.role_labels(),
        }),
        table: render_user_table(&state.users),
        new_modal: UserModalView::render(&state.new_user),
        edit_modal: UserModalView::render(&state.edit_user),
        delete_modal,
        notice: state.notice.as_ref().map(|notice| notice.message.clone()),
    }
}

impl fmt::Display for AdminView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(header) = &self.header {
            writeln!(f, "{} with roles: {}", header.email, header.roles)?;
            writeln!(f)?;
        }
        if let Some(notice) = &self.notice {
            writeln!(f, "! {notice}")?;
        }
        write!(f, "{}", self.table)
    }
}
