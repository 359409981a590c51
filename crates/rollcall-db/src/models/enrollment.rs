//! Enrollment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the enrollments table
#[derive(Debug, Clone, FromRow)]
pub struct EnrollmentModel {
    pub id: i64,
    pub name: String,
    pub roll_no: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub class_id: i64,
    pub class_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
}
