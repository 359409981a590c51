//! Attendance database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for the attendance table
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceModel {
    pub id: i64,
    pub enrollment_id: i64,
    pub class_id: i64,
    pub date: NaiveDate,
    pub status: String,
    pub lectures: i32,
    pub created_at: DateTime<Utc>,
}
