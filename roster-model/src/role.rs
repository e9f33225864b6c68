/// Prefix carried by every system role name. Stripped for display.
pub const ROLE_PREFIX: &str = "ROLE_";

/// A system-defined role, e.g. `ROLE_ADMIN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Role {
    pub name: String,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Display label with the `ROLE_` prefix removed.
    pub fn label(&self) -> &str {
        role_label(&self.name)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Strips the first occurrence of [`ROLE_PREFIX`] from a role name.
///
/// Names without the prefix are returned unchanged.
pub fn role_label(name: &str) -> &str {
    name.strip_prefix(ROLE_PREFIX).unwrap_or(name)
}

/// Comma-joined display labels, in the order given.
pub fn join_role_labels<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| role_label(name.as_ref()).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_strips_prefix_only() {
        assert_eq!(Role::new("ROLE_ADMIN").label(), "ADMIN");
        assert_eq!(role_label("USER"), "USER");
        assert_eq!(role_label("ROLE_ROLE_X"), "ROLE_X");
    }

    #[test]
    fn joins_labels_in_order() {
        assert_eq!(join_role_labels(["ROLE_USER", "ROLE_ADMIN"]), "USER, ADMIN");
        assert_eq!(join_role_labels(Vec::<String>::new()), "");
    }
}
