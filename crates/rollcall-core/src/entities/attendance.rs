//! Attendance record - one student's mark for one class on one date

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{AttendanceStatus, Snowflake};

/// Attendance record
///
/// At most one record exists per (enrollment, class, date). Corrections
/// replace the whole day rather than editing a record in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub id: Snowflake,
    pub enrollment_id: Snowflake,
    pub class_id: Snowflake,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub lectures: i32,
    pub created_at: DateTime<Utc>,
}

impl AttendanceRecord {
    pub fn new(
        id: Snowflake,
        enrollment_id: Snowflake,
        class_id: Snowflake,
        date: NaiveDate,
        status: AttendanceStatus,
        lectures: i32,
    ) -> Self {
        Self {
            id,
            enrollment_id,
            class_id,
            date,
            status,
            lectures,
            created_at: Utc::now(),
        }
    }

    /// Lectures counted as attended for this date
    #[inline]
    pub fn attended_lectures(&self) -> i64 {
        if self.status.is_present() {
            i64::from(self.lectures)
        } else {
            0
        }
    }

    /// Natural key used for upserts
    #[inline]
    pub fn key(&self) -> (Snowflake, Snowflake, NaiveDate) {
        (self.enrollment_id, self.class_id, self.date)
    }
}
