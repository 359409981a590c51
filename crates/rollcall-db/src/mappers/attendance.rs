//! Attendance entity <-> model mapper

use rollcall_core::entities::AttendanceRecord;
use rollcall_core::value_objects::{AttendanceStatus, Snowflake};

use crate::models::AttendanceModel;

impl From<AttendanceModel> for AttendanceRecord {
    fn from(model: AttendanceModel) -> Self {
        AttendanceRecord {
            id: Snowflake::new(model.id),
            enrollment_id: Snowflake::new(model.enrollment_id),
            class_id: Snowflake::new(model.class_id),
            date: model.date,
            // CHECK constraint limits the column to present/absent
            status: model.status.parse().unwrap_or(AttendanceStatus::Absent),
            lectures: model.lectures,
            created_at: model.created_at,
        }
    }
}
