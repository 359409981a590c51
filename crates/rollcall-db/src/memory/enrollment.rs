//! In-memory EnrollmentRepository

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use rollcall_core::entities::EnrollmentRecord;
use rollcall_core::error::DomainError;
use rollcall_core::traits::{EnrollmentRepository, RepoResult};
use rollcall_core::value_objects::Snowflake;

#[derive(Default)]
pub struct MemoryEnrollmentRepository {
    rows: RwLock<HashMap<Snowflake, EnrollmentRecord>>,
}

impl MemoryEnrollmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn update_memberships(
        &self,
        pred: impl Fn(&EnrollmentRecord) -> bool,
        update: impl Fn(&mut EnrollmentRecord),
    ) -> u64 {
        let mut touched = 0;
        for row in self.rows.write().values_mut().filter(|r| pred(r)) {
            update(row);
            touched += 1;
        }
        touched
    }
}

#[async_trait]
impl EnrollmentRepository for MemoryEnrollmentRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<EnrollmentRecord>> {
        Ok(self.rows.read().get(&id).cloned())
    }

    async fn find_by_class_and_roll(
        &self,
        class_id: Snowflake,
        roll_no: &str,
    ) -> RepoResult<Option<EnrollmentRecord>> {
        Ok(self
            .rows
            .read()
            .values()
            .find(|r| r.class_id == class_id && r.roll_no == roll_no)
            .cloned())
    }

    async fn list_by_class(&self, class_id: Snowflake) -> RepoResult<Vec<EnrollmentRecord>> {
        let mut rows: Vec<EnrollmentRecord> = self
            .rows
            .read()
            .values()
            .filter(|r| r.class_id == class_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.roll_no.cmp(&b.roll_no));
        Ok(rows)
    }

    async fn list_by_roll(&self, roll_no: &str) -> RepoResult<Vec<EnrollmentRecord>> {
        let mut rows: Vec<EnrollmentRecord> = self
            .rows
            .read()
            .values()
            .filter(|r| r.roll_no == roll_no)
            .cloned()
            .collect();
        rows.sort_by_key(|r| (r.created_at, r.id));
        Ok(rows)
    }

    async fn create(&self, enrollment: &EnrollmentRecord) -> RepoResult<()> {
        let mut rows = self.rows.write();
        let taken = rows
            .values()
            .any(|r| r.class_id == enrollment.class_id && r.roll_no == enrollment.roll_no);
        if taken {
            return Err(DomainError::DuplicateEnrollment);
        }
        rows.insert(enrollment.id, enrollment.clone());
        Ok(())
    }

    async fn add_membership(&self, roll_no: &str, class_id: Snowflake) -> RepoResult<u64> {
        Ok(self.update_memberships(
            |r| r.roll_no == roll_no && !r.class_ids.contains(&class_id),
            |r| r.class_ids.push(class_id),
        ))
    }

    async fn remove_membership(&self, roll_no: &str, class_id: Snowflake) -> RepoResult<u64> {
        Ok(self.update_memberships(
            |r| r.roll_no == roll_no && r.class_ids.contains(&class_id),
            |r| r.class_ids.retain(|id| *id != class_id),
        ))
    }

    async fn strip_class(&self, class_id: Snowflake) -> RepoResult<u64> {
        Ok(self.update_memberships(
            |r| r.class_ids.contains(&class_id),
            |r| r.class_ids.retain(|id| *id != class_id),
        ))
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.rows
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::NotFound("Student"))
    }

    async fn delete_by_class(&self, class_id: Snowflake) -> RepoResult<u64> {
        let mut rows = self.rows.write();
        let before = rows.len();
        rows.retain(|_, r| r.class_id != class_id);
        Ok((before - rows.len()) as u64)
    }
}
