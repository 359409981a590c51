//! PostgreSQL implementation of AttendanceRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use rollcall_core::entities::AttendanceRecord;
use rollcall_core::traits::{AttendanceRepository, RepoResult};
use rollcall_core::value_objects::Snowflake;

use crate::models::AttendanceModel;

use super::error::map_db_error;

const ATTENDANCE_COLUMNS: &str = "id, enrollment_id, class_id, date, status, lectures, created_at";

/// PostgreSQL implementation of AttendanceRepository
#[derive(Clone)]
pub struct PgAttendanceRepository {
    pool: PgPool,
}

impl PgAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for PgAttendanceRepository {
    #[instrument(skip(self, records), fields(count = records.len()))]
    async fn upsert_many(&self, records: &[AttendanceRecord]) -> RepoResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        let ids: Vec<i64> = records.iter().map(|r| r.id.into_inner()).collect();
        let enrollment_ids: Vec<i64> = records.iter().map(|r| r.enrollment_id.into_inner()).collect();
        let class_ids: Vec<i64> = records.iter().map(|r| r.class_id.into_inner()).collect();
        let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
        let statuses: Vec<&str> = records.iter().map(|r| r.status.as_str()).collect();
        let lectures: Vec<i32> = records.iter().map(|r| r.lectures).collect();

        // One statement per batch; each row is atomic and the unique key
        // keeps concurrent markers from producing duplicates.
        sqlx::query(
            r"
            INSERT INTO attendance (id, enrollment_id, class_id, date, status, lectures)
            SELECT * FROM UNNEST($1::BIGINT[], $2::BIGINT[], $3::BIGINT[], $4::DATE[],
                                 $5::VARCHAR[], $6::INTEGER[])
            ON CONFLICT (enrollment_id, class_id, date)
            DO UPDATE SET status = EXCLUDED.status, lectures = EXCLUDED.lectures,
                          created_at = NOW()
            ",
        )
        .bind(ids)
        .bind(enrollment_ids)
        .bind(class_ids)
        .bind(dates)
        .bind(statuses)
        .bind(lectures)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_class_and_date(
        &self,
        class_id: Snowflake,
        date: NaiveDate,
    ) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM attendance WHERE class_id = $1 AND date = $2")
            .bind(class_id.into_inner())
            .bind(date)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete_by_enrollment(
        &self,
        enrollment_id: Snowflake,
        class_id: Snowflake,
    ) -> RepoResult<u64> {
        let result =
            sqlx::query("DELETE FROM attendance WHERE class_id = $1 AND enrollment_id = $2")
                .bind(class_id.into_inner())
                .bind(enrollment_id.into_inner())
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete_by_class(&self, class_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM attendance WHERE class_id = $1")
            .bind(class_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn list_by_class_and_date(
        &self,
        class_id: Snowflake,
        date: NaiveDate,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        let sql = format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE class_id = $1 AND date = $2 \
             ORDER BY enrollment_id"
        );
        let results = sqlx::query_as::<_, AttendanceModel>(&sql)
            .bind(class_id.into_inner())
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(AttendanceRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_by_enrollment(
        &self,
        enrollment_id: Snowflake,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        let sql = format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE enrollment_id = $1 ORDER BY date"
        );
        let results = sqlx::query_as::<_, AttendanceModel>(&sql)
            .bind(enrollment_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(AttendanceRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_by_class(&self, class_id: Snowflake) -> RepoResult<Vec<AttendanceRecord>> {
        let sql = format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE class_id = $1 \
             ORDER BY date, enrollment_id"
        );
        let results = sqlx::query_as::<_, AttendanceModel>(&sql)
            .bind(class_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(AttendanceRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_dates(&self, class_id: Snowflake) -> RepoResult<Vec<NaiveDate>> {
        sqlx::query_scalar::<_, NaiveDate>(
            r"
            SELECT DISTINCT date FROM attendance WHERE class_id = $1 ORDER BY date DESC
            ",
        )
        .bind(class_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
