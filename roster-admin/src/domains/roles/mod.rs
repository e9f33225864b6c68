//! Role checklist rendering
//!
//! Turns the role catalogue into a list of checkboxes. Box ids are scoped by
//! the owning form so the New and Edit checklists can coexist.

use std::collections::HashSet;
use std::fmt;

use roster_model::Role;

/// Which form a checklist belongs to. Used as the id prefix of every box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecklistScope {
    New,
    Edit,
    Delete,
}

impl ChecklistScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistScope::New => "newRoles",
            ChecklistScope::Edit => "editRoles",
            ChecklistScope::Delete => "deleteRoles",
        }
    }
}

impl fmt::Display for ChecklistScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCheckbox {
    /// `"{scope}-{role name}"`
    pub id: String,
    /// Full role name, submitted as-is.
    pub value: String,
    /// Role name without the `ROLE_` prefix.
    pub label: String,
    pub checked: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleChecklist {
    scope: ChecklistScope,
    boxes: Vec<RoleCheckbox>,
}

impl RoleChecklist {
    /// One box per role in catalogue order, checked when the role name is
    /// in `assigned`. Names in `assigned` that are not in the catalogue are
    /// ignored.
    pub fn render<I, S>(scope: ChecklistScope, roles: &[Role], assigned: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let assigned: HashSet<String> = assigned
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();

        let boxes = roles
            .iter()
            .map(|role| RoleCheckbox {
                id: format!("{}-{}", scope.as_str(), role.name),
                value: role.name.clone(),
                label: role.label().to_string(),
                checked: assigned.contains(&role.name),
                disabled: false,
            })
            .collect();

        Self { scope, boxes }
    }

    /// Nothing checked.
    pub fn empty(scope: ChecklistScope, roles: &[Role]) -> Self {
        Self::render(scope, roles, std::iter::empty::<&str>())
    }

    /// Read-only copy, as shown by the delete confirmation.
    pub fn disabled(mut self) -> Self {
        for checkbox in &mut self.boxes {
            checkbox.disabled = true;
        }
        self
    }

    pub fn scope(&self) -> ChecklistScope {
        self.scope
    }

    pub fn boxes(&self) -> &[RoleCheckbox] {
        &self.boxes
    }

    pub fn get(&self, value: &str) -> Option<&RoleCheckbox> {
        self.boxes.iter().find(|checkbox| checkbox.value == value)
    }

    /// Checked role names, in render order.
    pub fn checked_values(&self) -> Vec<String> {
        self.boxes
            .iter()
            .filter(|checkbox| checkbox.checked)
            .map(|checkbox| checkbox.value.clone())
            .collect()
    }

    pub fn has_checked(&self) -> bool {
        self.boxes.iter().any(|checkbox| checkbox.checked)
    }

    /// Returns false when no enabled box carries `value`.
    pub fn set_checked(&mut self, value: &str, checked: bool) -> bool {
        match self
            .boxes
            .iter_mut()
            .find(|checkbox| checkbox.value == value && !checkbox.disabled)
        {
            Some(checkbox) => {
                checkbox.checked = checked;
                true
            }
            None => false,
        }
    }

    pub fn toggle(&mut self, value: &str) -> bool {
        let checked = self.get(value).map(|checkbox| checkbox.checked);
        match checked {
            Some(checked) => self.set_checked(value, !checked),
            None => false,
        }
    }

    pub fn clear(&mut self) {
        for checkbox in &mut self.boxes {
            checkbox.checked = false;
        }
    }
}

impl fmt::Display for RoleChecklist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .boxes
            .iter()
            .map(|checkbox| {
                let mark = if checkbox.checked { "x" } else { " " };
                format!("[{mark}] {}", checkbox.label)
            })
            .collect();
        f.write_str(&rendered.join("  "))
    }
}
