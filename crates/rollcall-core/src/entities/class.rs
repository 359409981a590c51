//! Class entity - a course section with a shared teacher set

use chrono::{DateTime, Utc};

use crate::value_objects::{JoinCode, Snowflake};

/// Class record
///
/// `created_by` and `class_code` never change after creation. The creator is
/// always present in `teacher_ids`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    pub id: Snowflake,
    pub name: String,
    pub room: String,
    pub subject: String,
    pub description: Option<String>,
    pub created_by: Snowflake,
    pub teacher_ids: Vec<Snowflake>,
    pub class_code: JoinCode,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClassRecord {
    pub fn new(
        id: Snowflake,
        name: String,
        room: String,
        subject: String,
        created_by: Snowflake,
        class_code: JoinCode,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            room,
            subject,
            description: None,
            created_by,
            teacher_ids: vec![created_by],
            class_code,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    #[inline]
    pub fn has_teacher(&self, account_id: Snowflake) -> bool {
        self.teacher_ids.contains(&account_id)
    }

    #[inline]
    pub fn is_creator(&self, account_id: Snowflake) -> bool {
        self.created_by == account_id
    }

    /// Add a co-teacher; returns `false` when already a member
    pub fn add_teacher(&mut self, account_id: Snowflake) -> bool {
        if self.has_teacher(account_id) {
            return false;
        }
        self.teacher_ids.push(account_id);
        self.updated_at = Utc::now();
        true
    }
}
