use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<FixedOffset>,
}

/// Validated input for a new record; id and timestamp come from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl From<models::user::Model> for User {
    fn from(m: models::user::Model) -> Self {
        Self { id: m.id, name: m.name, email: m.email, created_at: m.created_at }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User(id={}, name={}, email={}, createdAt={})",
            self.id,
            self.name,
            self.email,
            self.created_at.to_rfc3339()
        )
    }
}
