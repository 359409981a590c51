//! Enrollment entity <-> model mapper

use rollcall_core::entities::EnrollmentRecord;
use rollcall_core::value_objects::Snowflake;

use super::class::ids_from_db;
use crate::models::EnrollmentModel;

impl From<EnrollmentModel> for EnrollmentRecord {
    fn from(model: EnrollmentModel) -> Self {
        EnrollmentRecord {
            id: Snowflake::new(model.id),
            name: model.name,
            roll_no: model.roll_no,
            email: model.email,
            phone: model.phone,
            class_id: Snowflake::new(model.class_id),
            class_ids: ids_from_db(model.class_ids),
            created_at: model.created_at,
        }
    }
}
