//! Class entity <-> model mapper

use rollcall_core::entities::ClassRecord;
use rollcall_core::error::DomainError;
use rollcall_core::value_objects::{JoinCode, Snowflake};

use crate::models::ClassModel;

pub fn ids_from_db(ids: Vec<i64>) -> Vec<Snowflake> {
    ids.into_iter().map(Snowflake::new).collect()
}

pub fn ids_to_db(ids: &[Snowflake]) -> Vec<i64> {
    ids.iter().map(|id| id.into_inner()).collect()
}

impl TryFrom<ClassModel> for ClassRecord {
    type Error = DomainError;

    fn try_from(model: ClassModel) -> Result<Self, Self::Error> {
        let class_code = JoinCode::parse(&model.class_code).map_err(|_| {
            DomainError::DatabaseError(format!("class {} has a malformed join code", model.id))
        })?;

        Ok(ClassRecord {
            id: Snowflake::new(model.id),
            name: model.name,
            room: model.room,
            subject: model.subject,
            description: model.description,
            created_by: Snowflake::new(model.created_by),
            teacher_ids: ids_from_db(model.teacher_ids),
            class_code,
            active: model.active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
