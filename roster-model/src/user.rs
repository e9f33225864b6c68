use crate::ids::UserId;
use crate::role::join_role_labels;

/// A user account as returned by the backend.
///
/// The backend never returns the password; unknown fields are ignored on
/// decode so its `password: null` is simply dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub age: i32,
    pub email: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub roles: Vec<String>,
}

impl User {
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|role| role == name)
    }

    /// Role labels joined for display, e.g. `"ADMIN, USER"`.
    pub fn role_labels(&self) -> String {
        join_role_labels(&self.roles)
    }
}

/// Request body for create (POST) and full update (PUT).
///
/// `age` is `None` when the form text is not a number, letting the server
/// report it as a field error. `password` is omitted from the wire when
/// unset so an edit without a new password keeps the stored one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserPayload {
    pub name: String,
    pub age: Option<i32>,
    pub email: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub password: Option<String>,
    pub roles: Vec<String>,
}

impl From<&User> for UserPayload {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            age: Some(user.age),
            email: user.email.clone(),
            password: None,
            roles: user.roles.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User {
            id: UserId(3),
            name: "Ada".into(),
            age: 36,
            email: "ada@example.com".into(),
            roles: vec!["ROLE_ADMIN".into(), "ROLE_USER".into()],
        }
    }

    #[test]
    fn role_helpers() {
        let user = sample();
        assert!(user.has_role("ROLE_ADMIN"));
        assert!(!user.has_role("ADMIN"));
        assert_eq!(user.role_labels(), "ADMIN, USER");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn decode_ignores_password_field() {
        let raw = r#"{"id":3,"name":"Ada","age":36,"email":"ada@example.com","password":null,"roles":["ROLE_ADMIN"]}"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.id, UserId(3));
        assert_eq!(user.roles, vec!["ROLE_ADMIN".to_string()]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn payload_omits_unset_password() {
        let payload = UserPayload::from(&sample());
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["age"], 36);
    }
}
