//! In-memory ClassRepository

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;

use rollcall_core::entities::ClassRecord;
use rollcall_core::error::DomainError;
use rollcall_core::traits::{ClassRepository, RepoResult};
use rollcall_core::value_objects::{JoinCode, Snowflake};

#[derive(Default)]
pub struct MemoryClassRepository {
    rows: RwLock<HashMap<Snowflake, ClassRecord>>,
}

impl MemoryClassRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn newest_first(&self, pred: impl Fn(&ClassRecord) -> bool) -> Vec<ClassRecord> {
        let mut classes: Vec<ClassRecord> =
            self.rows.read().values().filter(|c| pred(c)).cloned().collect();
        classes.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        classes
    }
}

#[async_trait]
impl ClassRepository for MemoryClassRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ClassRecord>> {
        Ok(self.rows.read().get(&id).cloned())
    }

    async fn find_by_code(&self, code: &JoinCode) -> RepoResult<Option<ClassRecord>> {
        Ok(self
            .rows
            .read()
            .values()
            .find(|c| &c.class_code == code)
            .cloned())
    }

    async fn code_exists(&self, code: &JoinCode) -> RepoResult<bool> {
        Ok(self.rows.read().values().any(|c| &c.class_code == code))
    }

    async fn list(&self) -> RepoResult<Vec<ClassRecord>> {
        Ok(self.newest_first(|_| true))
    }

    async fn list_by_teacher(&self, teacher_id: Snowflake) -> RepoResult<Vec<ClassRecord>> {
        Ok(self.newest_first(|c| c.has_teacher(teacher_id)))
    }

    async fn create(&self, class: &ClassRecord) -> RepoResult<()> {
        let mut rows = self.rows.write();
        if rows.values().any(|c| c.class_code == class.class_code) {
            return Err(DomainError::JoinCodeExists);
        }
        rows.insert(class.id, class.clone());
        Ok(())
    }

    async fn update(&self, class: &ClassRecord) -> RepoResult<()> {
        let mut rows = self.rows.write();
        let stored = rows.get_mut(&class.id).ok_or(DomainError::NotFound("Class"))?;
        stored.name.clone_from(&class.name);
        stored.room.clone_from(&class.room);
        stored.subject.clone_from(&class.subject);
        stored.description.clone_from(&class.description);
        stored.active = class.active;
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn add_teacher(&self, class_id: Snowflake, teacher_id: Snowflake) -> RepoResult<bool> {
        Ok(self
            .rows
            .write()
            .get_mut(&class_id)
            .is_some_and(|c| c.add_teacher(teacher_id)))
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.rows
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::NotFound("Class"))
    }
}
