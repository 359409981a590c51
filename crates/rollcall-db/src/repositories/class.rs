//! PostgreSQL implementation of ClassRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use rollcall_core::entities::ClassRecord;
use rollcall_core::error::DomainError;
use rollcall_core::traits::{ClassRepository, RepoResult};
use rollcall_core::value_objects::{JoinCode, Snowflake};

use crate::mappers::ids_to_db;
use crate::models::ClassModel;

use super::error::{map_db_error, map_unique_violation};

const CLASS_COLUMNS: &str = "id, name, room, subject, description, created_by, teacher_ids, \
                             class_code, active, created_at, updated_at";

fn into_records(models: Vec<ClassModel>) -> RepoResult<Vec<ClassRecord>> {
    models.into_iter().map(ClassRecord::try_from).collect()
}

/// PostgreSQL implementation of ClassRepository
#[derive(Clone)]
pub struct PgClassRepository {
    pool: PgPool,
}

impl PgClassRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassRepository for PgClassRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ClassRecord>> {
        let sql = format!("SELECT {CLASS_COLUMNS} FROM classes WHERE id = $1");
        sqlx::query_as::<_, ClassModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .map(ClassRecord::try_from)
            .transpose()
    }

    #[instrument(skip(self), fields(code = %code))]
    async fn find_by_code(&self, code: &JoinCode) -> RepoResult<Option<ClassRecord>> {
        let sql = format!("SELECT {CLASS_COLUMNS} FROM classes WHERE class_code = $1");
        sqlx::query_as::<_, ClassModel>(&sql)
            .bind(code.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .map(ClassRecord::try_from)
            .transpose()
    }

    #[instrument(skip(self), fields(code = %code))]
    async fn code_exists(&self, code: &JoinCode) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM classes WHERE class_code = $1)
            ",
        )
        .bind(code.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<ClassRecord>> {
        let sql = format!("SELECT {CLASS_COLUMNS} FROM classes ORDER BY created_at DESC, id DESC");
        let models = sqlx::query_as::<_, ClassModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_records(models)
    }

    #[instrument(skip(self))]
    async fn list_by_teacher(&self, teacher_id: Snowflake) -> RepoResult<Vec<ClassRecord>> {
        let sql = format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE $1 = ANY(teacher_ids) \
             ORDER BY created_at DESC, id DESC"
        );
        let models = sqlx::query_as::<_, ClassModel>(&sql)
            .bind(teacher_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_records(models)
    }

    #[instrument(skip(self, class), fields(class_id = %class.id))]
    async fn create(&self, class: &ClassRecord) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO classes
                (id, name, room, subject, description, created_by, teacher_ids,
                 class_code, active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(class.id.into_inner())
        .bind(&class.name)
        .bind(&class.room)
        .bind(&class.subject)
        .bind(&class.description)
        .bind(class.created_by.into_inner())
        .bind(ids_to_db(&class.teacher_ids))
        .bind(class.class_code.as_str())
        .bind(class.active)
        .bind(class.created_at)
        .bind(class.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::JoinCodeExists))?;

        Ok(())
    }

    #[instrument(skip(self, class), fields(class_id = %class.id))]
    async fn update(&self, class: &ClassRecord) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE classes
            SET name = $2, room = $3, subject = $4, description = $5, active = $6,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(class.id.into_inner())
        .bind(&class.name)
        .bind(&class.room)
        .bind(&class.subject)
        .bind(&class.description)
        .bind(class.active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Class"));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn add_teacher(&self, class_id: Snowflake, teacher_id: Snowflake) -> RepoResult<bool> {
        // Single statement so concurrent joins cannot append the same id twice
        let result = sqlx::query(
            r"
            UPDATE classes
            SET teacher_ids = array_append(teacher_ids, $2), updated_at = NOW()
            WHERE id = $1 AND NOT ($2 = ANY(teacher_ids))
            ",
        )
        .bind(class_id.into_inner())
        .bind(teacher_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Class"));
        }
        Ok(())
    }
}
