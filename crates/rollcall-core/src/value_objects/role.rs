//! Account roles and the actor resolved for each request

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Role held by an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }

    #[inline]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Roles that may own or co-teach classes
    #[inline]
    pub fn can_teach(self) -> bool {
        matches!(self, Self::Admin | Self::Teacher)
    }

    /// Roles that may be chosen through public registration
    #[inline]
    pub fn is_self_service(self) -> bool {
        matches!(self, Self::Teacher | Self::Student)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            other => Err(DomainError::ValidationError(format!("unknown role '{other}'"))),
        }
    }
}

/// Who is performing an operation
///
/// Students never hold a session; they identify themselves by roll number
/// alone and are limited to reading their own attendance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Account { id: Snowflake, role: Role },
    RollNumber(String),
    Anonymous,
}

impl Actor {
    pub fn account(id: Snowflake, role: Role) -> Self {
        Self::Account { id, role }
    }

    pub fn account_id(&self) -> Option<Snowflake> {
        match self {
            Self::Account { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Account { role, .. } => Some(*role),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(Role::is_admin)
    }
}
