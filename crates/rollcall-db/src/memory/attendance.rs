//! In-memory AttendanceRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};

use rollcall_core::entities::AttendanceRecord;
use rollcall_core::traits::{AttendanceRepository, RepoResult};
use rollcall_core::value_objects::Snowflake;

type Key = (Snowflake, Snowflake, NaiveDate);

/// Records keyed by (enrollment, class, date), mirroring the unique constraint
#[derive(Default)]
pub struct MemoryAttendanceRepository {
    rows: RwLock<HashMap<Key, AttendanceRecord>>,
}

impl MemoryAttendanceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn remove_where(&self, pred: impl Fn(&AttendanceRecord) -> bool) -> u64 {
        let mut rows = self.rows.write();
        let before = rows.len();
        rows.retain(|_, r| !pred(r));
        (before - rows.len()) as u64
    }

    fn collect_where(&self, pred: impl Fn(&AttendanceRecord) -> bool) -> Vec<AttendanceRecord> {
        let mut records: Vec<AttendanceRecord> =
            self.rows.read().values().filter(|r| pred(r)).cloned().collect();
        records.sort_by_key(|r| (r.date, r.enrollment_id));
        records
    }
}

#[async_trait]
impl AttendanceRepository for MemoryAttendanceRepository {
    async fn upsert_many(&self, records: &[AttendanceRecord]) -> RepoResult<()> {
        let mut rows = self.rows.write();
        for record in records {
            rows.entry(record.key())
                .and_modify(|existing| {
                    existing.status = record.status;
                    existing.lectures = record.lectures;
                    existing.created_at = record.created_at;
                })
                .or_insert_with(|| record.clone());
        }
        Ok(())
    }

    async fn delete_by_class_and_date(
        &self,
        class_id: Snowflake,
        date: NaiveDate,
    ) -> RepoResult<u64> {
        Ok(self.remove_where(|r| r.class_id == class_id && r.date == date))
    }

    async fn delete_by_enrollment(
        &self,
        enrollment_id: Snowflake,
        class_id: Snowflake,
    ) -> RepoResult<u64> {
        Ok(self.remove_where(|r| r.enrollment_id == enrollment_id && r.class_id == class_id))
    }

    async fn delete_by_class(&self, class_id: Snowflake) -> RepoResult<u64> {
        Ok(self.remove_where(|r| r.class_id == class_id))
    }

    async fn list_by_class_and_date(
        &self,
        class_id: Snowflake,
        date: NaiveDate,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        Ok(self.collect_where(|r| r.class_id == class_id && r.date == date))
    }

    async fn list_by_enrollment(
        &self,
        enrollment_id: Snowflake,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        Ok(self.collect_where(|r| r.enrollment_id == enrollment_id))
    }

    async fn list_by_class(&self, class_id: Snowflake) -> RepoResult<Vec<AttendanceRecord>> {
        Ok(self.collect_where(|r| r.class_id == class_id))
    }

    async fn list_dates(&self, class_id: Snowflake) -> RepoResult<Vec<NaiveDate>> {
        let dates: BTreeSet<NaiveDate> = self
            .rows
            .read()
            .values()
            .filter(|r| r.class_id == class_id)
            .map(|r| r.date)
            .collect();
        Ok(dates.into_iter().rev().collect())
    }
}
