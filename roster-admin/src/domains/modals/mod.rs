//! New / Edit / Delete dialogs
//!
//! Each dialog is a small state machine over [`ModalPhase`]. Transitions
//! happen only in [`update::update_modals`]; everything else reads.

pub mod form;
pub mod messages;
pub mod update;

use roster_model::{Role, User, UserId};

use self::form::{FormErrors, UserForm};
use crate::domains::roles::{ChecklistScope, RoleChecklist};

pub use messages::Message as ModalMessage;

/// Shown when a submit is attempted with no role checked.
pub const AT_LEAST_ONE_ROLE: &str = "At least one role must be selected!";
/// Shown when the request failed without a usable error envelope.
pub const NETWORK_ERROR: &str = "Network or server error occurred.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    Open,
    /// A request is in flight. Left only by its result or by closing.
    Submitting,
}

/// The New or the Edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserModal {
    pub phase: ModalPhase,
    pub form: UserForm,
    pub errors: FormErrors,
}

impl UserModal {
    pub fn closed(scope: ChecklistScope) -> Self {
        Self {
            phase: ModalPhase::Closed,
            form: UserForm::blank(scope, &[]),
            errors: FormErrors::default(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    pub fn open_with(&mut self, form: UserForm) {
        self.form = form;
        self.errors.clear();
        self.phase = ModalPhase::Open;
    }

    pub fn close(&mut self) {
        self.phase = ModalPhase::Closed;
        self.errors.clear();
    }
}

/// What the delete confirmation shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub id: UserId,
    /// Passed from the row that triggered the dialog.
    pub name: String,
    /// The in-memory record, when the list still holds it.
    pub details: Option<User>,
    /// Read-only checklist of the user's roles.
    pub roles: RoleChecklist,
}

impl DeleteTarget {
    pub fn new(id: UserId, name: String, details: Option<User>, roles: &[Role]) -> Self {
        let assigned = details
            .as_ref()
            .map(|user| user.roles.clone())
            .unwrap_or_default();
        let roles = RoleChecklist::render(ChecklistScope::Delete, roles, &assigned).disabled();
        Self {
            id,
            name,
            details,
            roles,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteModal {
    pub phase: ModalPhase,
    pub target: Option<DeleteTarget>,
    pub error: Option<String>,
}

impl DeleteModal {
    pub fn is_visible(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    pub fn close(&mut self) {
        self.phase = ModalPhase::Closed;
        self.target = None;
        self.error = None;
    }
}
