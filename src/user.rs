//! User records as served by the backend.

use crate::table::{Column, Row};
use serde::{Deserialize, Serialize};

/// One user record.
///
/// The backend sends camelCase JSON; `updatedAt` is kept as an opaque string.
///
/// ```rust
/// use userpager::user::User;
///
/// let user: User = serde_json::from_str(
///     r#"{"id":7,"firstname":"Ada","lastname":"Lovelace","email":"ada@example.com",
///         "phone":"+44 20 0000","updatedAt":"2024-01-02T03:04:05Z"}"#,
/// ).unwrap();
/// assert_eq!(user.updated_at, "2024-01-02T03:04:05Z");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique id.
    pub id: u64,
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Last update time, as sent by the backend.
    pub updated_at: String,
}

impl User {
    /// The table columns a user row fills, in display order.
    pub fn columns() -> Vec<Column> {
        vec![
            Column::new("ID"),
            Column::new("First name").with_width(20),
            Column::new("Last name").with_width(20),
            Column::new("Phone").with_width(20),
            Column::new("Email").with_width(32),
            Column::new("Updated at").with_width(28),
        ]
    }

    /// This user as a table row matching [`User::columns`].
    pub fn to_row(&self) -> Row {
        Row::new(vec![
            self.id.to_string(),
            self.firstname.clone(),
            self.lastname.clone(),
            self.phone.clone(),
            self.email.clone(),
            self.updated_at.clone(),
        ])
    }
}

/// What a source returns: the records plus their count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Number of records; always `records.len()`.
    pub item_count: usize,
    /// The records in display order.
    pub records: Vec<User>,
}

impl From<Vec<User>> for Listing {
    fn from(records: Vec<User>) -> Self {
        Self {
            item_count: records.len(),
            records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64) -> User {
        User {
            id,
            firstname: format!("First{}", id),
            lastname: format!("Last{}", id),
            email: format!("user{}@example.com", id),
            phone: format!("555-{:04}", id),
            updated_at: "2024-05-01T12:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_row_matches_columns() {
        let row = user(3).to_row();
        assert_eq!(row.cells.len(), User::columns().len());
        assert_eq!(row.cells[0], "3");
        assert_eq!(row.cells[3], "555-0003");
        assert_eq!(row.cells[4], "user3@example.com");
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(user(1)).unwrap();
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("updated_at").is_none());
    }

    #[test]
    fn test_listing_counts_records() {
        let listing = Listing::from((1..=45).map(user).collect::<Vec<_>>());
        assert_eq!(listing.item_count, 45);
    }
}
