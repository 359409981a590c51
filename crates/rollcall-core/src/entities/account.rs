//! Account entity - a person who can sign in (admin, teacher, or student)

use chrono::{DateTime, Utc};

use crate::value_objects::{Actor, Role, Snowflake};

/// Account entity
///
/// The password hash is not part of the entity; repositories store it next
/// to the row and only hand it out through `get_password_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        id: Snowflake,
        username: String,
        email: String,
        full_name: String,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            full_name,
            role,
            active: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The actor this account acts as once authenticated
    pub fn actor(&self) -> Actor {
        Actor::account(self.id, self.role)
    }

    pub fn record_login(&mut self, at: DateTime<Utc>) {
        self.last_login = Some(at);
    }

    /// Flip the active flag; accounts are never hard-deleted
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.updated_at = Utc::now();
    }
}
