//! Enrollment entity - one row per (roll number, class) membership

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Longest roll number accepted
pub const MAX_ROLL_NO_LEN: usize = 32;

/// Enrollment record ("student" in the UI)
///
/// A learner attending two classes has two rows sharing a roll number. Every
/// row carries the full `class_ids` membership set for cross-class lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRecord {
    pub id: Snowflake,
    pub name: String,
    pub roll_no: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub class_id: Snowflake,
    pub class_ids: Vec<Snowflake>,
    pub created_at: DateTime<Utc>,
}

impl EnrollmentRecord {
    pub fn new(id: Snowflake, name: String, roll_no: String, class_id: Snowflake) -> Self {
        Self {
            id,
            name,
            roll_no,
            email: None,
            phone: None,
            class_id,
            class_ids: vec![class_id],
            created_at: Utc::now(),
        }
    }

    pub fn with_contact(mut self, email: Option<String>, phone: Option<String>) -> Self {
        self.email = email;
        self.phone = phone;
        self
    }

    /// Fold another row's memberships into this one, keeping order and uniqueness
    pub fn merge_memberships<I>(&mut self, class_ids: I)
    where
        I: IntoIterator<Item = Snowflake>,
    {
        for id in class_ids {
            if !self.class_ids.contains(&id) {
                self.class_ids.push(id);
            }
        }
    }

    #[inline]
    pub fn belongs_to(&self, class_id: Snowflake) -> bool {
        self.class_id == class_id || self.class_ids.contains(&class_id)
    }
}

/// Trim and check a roll number supplied by a caller
pub fn normalize_roll_no(raw: &str) -> Result<String, DomainError> {
    let roll_no = raw.trim();
    if roll_no.is_empty() {
        return Err(DomainError::ValidationError("roll number is required".into()));
    }
    if roll_no.chars().count() > MAX_ROLL_NO_LEN {
        return Err(DomainError::ValidationError(format!(
            "roll number must be at most {MAX_ROLL_NO_LEN} characters"
        )));
    }
    if roll_no.chars().any(char::is_control) {
        return Err(DomainError::ValidationError(
            "roll number contains control characters".into(),
        ));
    }
    Ok(roll_no.to_string())
}
