//! PostgreSQL implementation of EnrollmentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use rollcall_core::entities::EnrollmentRecord;
use rollcall_core::error::DomainError;
use rollcall_core::traits::{EnrollmentRepository, RepoResult};
use rollcall_core::value_objects::Snowflake;

use crate::mappers::ids_to_db;
use crate::models::EnrollmentModel;

use super::error::{map_db_error, map_unique_violation};

const ENROLLMENT_COLUMNS: &str =
    "id, name, roll_no, email, phone, class_id, class_ids, created_at";

/// PostgreSQL implementation of EnrollmentRepository
#[derive(Clone)]
pub struct PgEnrollmentRepository {
    pool: PgPool,
}

impl PgEnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentRepository for PgEnrollmentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<EnrollmentRecord>> {
        let sql = format!("SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE id = $1");
        let result = sqlx::query_as::<_, EnrollmentModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(EnrollmentRecord::from))
    }

    #[instrument(skip(self))]
    async fn find_by_class_and_roll(
        &self,
        class_id: Snowflake,
        roll_no: &str,
    ) -> RepoResult<Option<EnrollmentRecord>> {
        let sql = format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE class_id = $1 AND roll_no = $2"
        );
        let result = sqlx::query_as::<_, EnrollmentModel>(&sql)
            .bind(class_id.into_inner())
            .bind(roll_no)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(EnrollmentRecord::from))
    }

    #[instrument(skip(self))]
    async fn list_by_class(&self, class_id: Snowflake) -> RepoResult<Vec<EnrollmentRecord>> {
        let sql = format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE class_id = $1 ORDER BY roll_no"
        );
        let results = sqlx::query_as::<_, EnrollmentModel>(&sql)
            .bind(class_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(EnrollmentRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_by_roll(&self, roll_no: &str) -> RepoResult<Vec<EnrollmentRecord>> {
        let sql = format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE roll_no = $1 ORDER BY created_at, id"
        );
        let results = sqlx::query_as::<_, EnrollmentModel>(&sql)
            .bind(roll_no)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(EnrollmentRecord::from).collect())
    }

    #[instrument(skip(self, enrollment), fields(roll_no = %enrollment.roll_no, class_id = %enrollment.class_id))]
    async fn create(&self, enrollment: &EnrollmentRecord) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO enrollments
                (id, name, roll_no, email, phone, class_id, class_ids, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(enrollment.id.into_inner())
        .bind(&enrollment.name)
        .bind(&enrollment.roll_no)
        .bind(&enrollment.email)
        .bind(&enrollment.phone)
        .bind(enrollment.class_id.into_inner())
        .bind(ids_to_db(&enrollment.class_ids))
        .bind(enrollment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::DuplicateEnrollment))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn add_membership(&self, roll_no: &str, class_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE enrollments
            SET class_ids = array_append(class_ids, $2)
            WHERE roll_no = $1 AND NOT ($2 = ANY(class_ids))
            ",
        )
        .bind(roll_no)
        .bind(class_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn remove_membership(&self, roll_no: &str, class_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE enrollments
            SET class_ids = array_remove(class_ids, $2)
            WHERE roll_no = $1 AND $2 = ANY(class_ids)
            ",
        )
        .bind(roll_no)
        .bind(class_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn strip_class(&self, class_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE enrollments
            SET class_ids = array_remove(class_ids, $1)
            WHERE $1 = ANY(class_ids)
            ",
        )
        .bind(class_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Student"));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_class(&self, class_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM enrollments WHERE class_id = $1")
            .bind(class_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
