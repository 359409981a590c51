//! Account entity <-> model mapper

use rollcall_core::entities::Account;
use rollcall_core::value_objects::{Role, Snowflake};

use crate::models::AccountModel;

/// Convert a stored role string to `Role`
///
/// The column has a CHECK constraint; anything unexpected gets the least
/// privileged role.
pub fn parse_role(role: &str) -> Role {
    role.parse().unwrap_or_else(|_| {
        tracing::warn!(role, "unknown role in accounts table");
        Role::Student
    })
}

impl From<AccountModel> for Account {
    fn from(model: AccountModel) -> Self {
        Account {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
            full_name: model.full_name,
            role: parse_role(&model.role),
            active: model.active,
            last_login: model.last_login,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
