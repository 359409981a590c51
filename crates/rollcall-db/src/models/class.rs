//! Class database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the classes table
#[derive(Debug, Clone, FromRow)]
pub struct ClassModel {
    pub id: i64,
    pub name: String,
    pub room: String,
    pub subject: String,
    pub description: Option<String>,
    pub created_by: i64,
    pub teacher_ids: Vec<i64>,
    pub class_code: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
