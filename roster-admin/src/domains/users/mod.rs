//! User table rendering
//!
//! The table is rebuilt from scratch on every render; rows have no identity
//! beyond the id column. Actions are plain data carried by each row and are
//! turned into messages by the controller, so nothing needs re-binding.

use std::fmt;

use roster_model::{User, UserId};

/// An action a row offers. Carries everything the controller needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Edit { id: UserId },
    Delete { id: UserId, name: String },
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Edit { .. } => "Edit",
            RowAction::Delete { .. } => "Delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: UserId,
    pub name: String,
    pub age: i32,
    pub email: String,
    /// Role labels without prefix, comma-joined.
    pub roles: String,
    pub actions: Vec<RowAction>,
}

impl UserRow {
    pub fn render(user: &User) -> Self {
        Self {
            actions: vec![
                RowAction::Edit { id: user.id },
                RowAction::Delete {
                    id: user.id,
                    name: user.name.clone(),
                },
            ],
            ..Self::read_only(user)
        }
    }

    /// A row without action controls.
    pub fn read_only(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            age: user.age,
            email: user.email.clone(),
            roles: user.role_labels(),
            actions: Vec::new(),
        }
    }

    pub fn action(&self, label: &str) -> Option<&RowAction> {
        self.actions.iter().find(|action| action.label() == label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserTable {
    pub rows: Vec<UserRow>,
}

impl UserTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, id: UserId) -> Option<&UserRow> {
        self.rows.iter().find(|row| row.id == id)
    }
}

/// One row per user with Edit/Delete actions, in input order.
pub fn render_user_table(users: &[User]) -> UserTable {
    UserTable {
        rows: users.iter().map(UserRow::render).collect(),
    }
}

const HEADERS: [&str; 5] = ["ID", "Name", "Age", "Email", "Role"];

impl fmt::Display for UserTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<[String; 5]> = self
            .rows
            .iter()
            .map(|row| {
                [
                    row.id.to_string(),
                    row.name.clone(),
                    row.age.to_string(),
                    row.email.clone(),
                    row.roles.clone(),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(|header| header.chars().count());
        for line in &cells {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let write_line = |f: &mut fmt::Formatter<'_>, line: &[&str]| -> fmt::Result {
            let padded: Vec<String> = line
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect();
            writeln!(f, "{}", padded.join(" | ").trim_end())
        };

        write_line(f, &HEADERS)?;
        for line in &cells {
            let refs: Vec<&str> = line.iter().map(String::as_str).collect();
            write_line(f, &refs)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::testing::sample_user;

    #[test]
    fn renders_columns_and_actions() {
        let users = vec![
            sample_user(1, "admin", &["ROLE_ADMIN", "ROLE_USER"]),
            sample_user(2, "bob", &["ROLE_USER"]),
        ];
        let table = render_user_table(&users);

        assert_eq!(table.len(), 2);
        let first = &table.rows[0];
        assert_eq!(first.roles, "ADMIN, USER");
        assert_eq!(first.email, "admin@example.com");
        assert_eq!(
            table.rows[1].action("Delete"),
            Some(&RowAction::Delete {
                id: UserId(2),
                name: "bob".into()
            })
        );
        assert_eq!(table.rows[1].action("Edit"), Some(&RowAction::Edit { id: UserId(2) }));
    }

    #[test]
    fn rerender_is_idempotent() {
        let users = vec![sample_user(4, "dora", &["ROLE_USER"])];
        assert_eq!(render_user_table(&users), render_user_table(&users));
        assert_eq!(
            render_user_table(&users).to_string(),
            render_user_table(&users).to_string()
        );
    }

    #[test]
    fn text_table_aligns_columns() {
        let table = render_user_table(&[sample_user(7, "eve", &["ROLE_USER"])]);
        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ID | Name | Age | Email           | Role");
        assert_eq!(lines[1], "7  | eve  | 30  | eve@example.com | USER");
    }

    #[test]
    fn read_only_rows_have_no_actions() {
        let row = UserRow::read_only(&sample_user(1, "admin", &["ROLE_ADMIN"]));
        assert!(row.actions.is_empty());
    }
}
