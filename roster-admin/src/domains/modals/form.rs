use std::collections::BTreeMap;

use roster_model::{ErrorBody, Role, User, UserId, UserPayload};

use crate::domains::roles::{ChecklistScope, RoleChecklist};

/// Input names present on the user forms. Server field errors for any other
/// key have nowhere to be shown and are dropped.
pub const FORM_FIELDS: [&str; 6] = ["id", "name", "age", "email", "password", "roles"];

/// A single edit to a user form.
#[derive(Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Name(String),
    Age(String),
    Email(String),
    Password(String),
    ToggleRole(String),
}

impl std::fmt::Debug for FieldEdit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldEdit::Name(value) => f.debug_tuple("Name").field(value).finish(),
            FieldEdit::Age(value) => f.debug_tuple("Age").field(value).finish(),
            FieldEdit::Email(value) => f.debug_tuple("Email").field(value).finish(),
            FieldEdit::Password(_) => f.write_str("Password(***)"),
            FieldEdit::ToggleRole(value) => f.debug_tuple("ToggleRole").field(value).finish(),
        }
    }
}

/// Text inputs and role checklist of the New and Edit dialogs.
#[derive(Clone, PartialEq, Eq)]
pub struct UserForm {
    /// Hidden id input; only set on the Edit form.
    pub id: Option<UserId>,
    pub name: String,
    pub age: String,
    pub email: String,
    pub password: String,
    pub roles: RoleChecklist,
}

impl std::fmt::Debug for UserForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserForm")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("age", &self.age)
            .field("email", &self.email)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .field("roles", &self.roles.checked_values())
            .finish()
    }
}

impl UserForm {
    pub fn blank(scope: ChecklistScope, roles: &[Role]) -> Self {
        Self {
            id: None,
            name: String::new(),
            age: String::new(),
            email: String::new(),
            password: String::new(),
            roles: RoleChecklist::empty(scope, roles),
        }
    }

    /// Edit form populated from a fetched record. The password always
    /// starts empty.
    pub fn from_user(user: &User, roles: &[Role]) -> Self {
        Self {
            id: Some(user.id),
            name: user.name.clone(),
            age: user.age.to_string(),
            email: user.email.clone(),
            password: String::new(),
            roles: RoleChecklist::render(ChecklistScope::Edit, roles, &user.roles),
        }
    }

    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Name(value) => self.name = value,
            FieldEdit::Age(value) => self.age = value,
            FieldEdit::Email(value) => self.email = value,
            FieldEdit::Password(value) => self.password = value,
            FieldEdit::ToggleRole(value) => {
                self.roles.toggle(&value);
            }
        }
    }

    /// Serialize the form. A non-numeric age becomes `None` and an empty
    /// password is left out.
    pub fn to_payload(&self) -> UserPayload {
        UserPayload {
            name: self.name.clone(),
            age: self.age.trim().parse().ok(),
            email: self.email.clone(),
            password: (!self.password.is_empty()).then(|| self.password.clone()),
            roles: self.roles.checked_values(),
        }
    }

    /// Clear every input and uncheck every role.
    pub fn reset(&mut self) {
        self.id = None;
        self.name.clear();
        self.age.clear();
        self.email.clear();
        self.password.clear();
        self.roles.clear();
    }
}

/// Validation feedback shown inside a dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub global: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl FormErrors {
    pub fn global(message: impl Into<String>) -> Self {
        Self {
            global: Some(message.into()),
            fields: BTreeMap::new(),
        }
    }

    /// Field errors for inputs the form has, plus the global message.
    pub fn from_body(body: &ErrorBody) -> Self {
        let fields = body
            .errors
            .iter()
            .filter(|(field, _)| FORM_FIELDS.contains(&field.as_str()))
            .map(|(field, message)| (field.clone(), message.clone()))
            .collect();
        Self {
            global: body.message.clone(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn is_invalid(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_none() && self.fields.is_empty()
    }

    pub fn clear(&mut self) {
        self.global = None;
        self.fields.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles() -> Vec<Role> {
        vec![Role::new("ROLE_ADMIN"), Role::new("ROLE_USER")]
    }

    #[test]
    fn payload_conversion() {
        let mut form = UserForm::blank(ChecklistScope::New, &roles());
        form.apply(FieldEdit::Name("Linus".into()));
        form.apply(FieldEdit::Age(" 54 ".into()));
        form.apply(FieldEdit::Email("linus@example.com".into()));
        form.apply(FieldEdit::ToggleRole("ROLE_USER".into()));

        let payload = form.to_payload();
        assert_eq!(payload.age, Some(54));
        assert_eq!(payload.password, None);
        assert_eq!(payload.roles, vec!["ROLE_USER".to_string()]);

        form.apply(FieldEdit::Age("old".into()));
        form.apply(FieldEdit::Password("hunter22".into()));
        let payload = form.to_payload();
        assert_eq!(payload.age, None);
        assert_eq!(payload.password.as_deref(), Some("hunter22"));
    }

    #[test]
    fn debug_masks_password() {
        let mut form = UserForm::blank(ChecklistScope::New, &roles());
        form.apply(FieldEdit::Password("topsecret".into()));
        let rendered = format!("{form:?}");
        assert!(!rendered.contains("topsecret"));
        assert!(!format!("{:?}", FieldEdit::Password("topsecret".into())).contains("topsecret"));
    }

    #[test]
    fn only_known_fields_are_marked() {
        let body = ErrorBody::default()
            .with_field_error("email", "already exists")
            .with_field_error("nickname", "unsupported");
        let errors = FormErrors::from_body(&body);
        assert_eq!(errors.field("email"), Some("already exists"));
        assert!(!errors.is_invalid("nickname"));
        assert_eq!(errors.fields.len(), 1);
        assert_eq!(errors.global, None);
    }

    #[test]
    fn reset_clears_everything() {
        let user = crate::infra::testing::sample_user(5, "kim", &["ROLE_ADMIN"]);
        let mut form = UserForm::from_user(&user, &roles());
        form.reset();
        assert_eq!(form, {
            let mut blank = UserForm::blank(ChecklistScope::Edit, &roles());
            blank.id = None;
            blank
        });
    }
}
