//! Service context - dependency container for services
//!
//! Holds the repositories, the session store, and the ID generator needed by
//! services. Storage is chosen when the context is built.

use std::sync::Arc;

use chrono::Duration;
use rollcall_cache::{MemorySessionStore, RedisPool};
use rollcall_common::PasswordService;
use rollcall_core::traits::{
    AccountRepository, AttendanceRepository, ClassRepository, EnrollmentRepository, SessionStore,
};
use rollcall_core::{Snowflake, SnowflakeGenerator};
use rollcall_db::{
    MemoryAccountRepository, MemoryAttendanceRepository, MemoryClassRepository,
    MemoryEnrollmentRepository, PgPool,
};

use super::error::{ServiceError, ServiceResult};

/// Default session lifetime (8 hours)
const DEFAULT_SESSION_TTL_SECONDS: i64 = 8 * 60 * 60;

/// Service context containing all dependencies
///
/// Every service borrows the context; repositories are trait objects so the
/// same services run over PostgreSQL or the in-memory stores.
#[derive(Clone)]
pub struct ServiceContext {
    // Connection pools, present only for the backends in use
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,

    // Repositories
    account_repo: Arc<dyn AccountRepository>,
    class_repo: Arc<dyn ClassRepository>,
    enrollment_repo: Arc<dyn EnrollmentRepository>,
    attendance_repo: Arc<dyn AttendanceRepository>,

    // Sessions
    session_store: Arc<dyn SessionStore>,
    session_ttl: Duration,

    password_service: PasswordService,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Context over process-local stores
    pub fn in_memory(worker_id: u16) -> Self {
        Self {
            pool: None,
            redis_pool: None,
            account_repo: Arc::new(MemoryAccountRepository::new()),
            class_repo: Arc::new(MemoryClassRepository::new()),
            enrollment_repo: Arc::new(MemoryEnrollmentRepository::new()),
            attendance_repo: Arc::new(MemoryAttendanceRepository::new()),
            session_store: Arc::new(MemorySessionStore::new()),
            session_ttl: Duration::seconds(DEFAULT_SESSION_TTL_SECONDS),
            password_service: PasswordService::new(),
            snowflake_generator: Arc::new(SnowflakeGenerator::new(worker_id)),
        }
    }

    // === Connection Pools ===

    /// PostgreSQL pool, when the Postgres backend is in use
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Redis pool, when sessions live in Redis
    pub fn redis_pool(&self) -> Option<&RedisPool> {
        self.redis_pool.as_ref()
    }

    // === Repositories ===

    pub fn account_repo(&self) -> &dyn AccountRepository {
        self.account_repo.as_ref()
    }

    pub fn class_repo(&self) -> &dyn ClassRepository {
        self.class_repo.as_ref()
    }

    pub fn enrollment_repo(&self) -> &dyn EnrollmentRepository {
        self.enrollment_repo.as_ref()
    }

    pub fn attendance_repo(&self) -> &dyn AttendanceRepository {
        self.attendance_repo.as_ref()
    }

    // === Sessions ===

    pub fn session_store(&self) -> &dyn SessionStore {
        self.session_store.as_ref()
    }

    /// Lifetime of newly issued sessions
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    // === Utilities ===

    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("redis_pool", &self.redis_pool)
            .field("repositories", &"...")
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,
    account_repo: Option<Arc<dyn AccountRepository>>,
    class_repo: Option<Arc<dyn ClassRepository>>,
    enrollment_repo: Option<Arc<dyn EnrollmentRepository>>,
    attendance_repo: Option<Arc<dyn AttendanceRepository>>,
    session_store: Option<Arc<dyn SessionStore>>,
    session_ttl: Option<Duration>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: RedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn account_repo(mut self, repo: Arc<dyn AccountRepository>) -> Self {
        self.account_repo = Some(repo);
        self
    }

    pub fn class_repo(mut self, repo: Arc<dyn ClassRepository>) -> Self {
        self.class_repo = Some(repo);
        self
    }

    pub fn enrollment_repo(mut self, repo: Arc<dyn EnrollmentRepository>) -> Self {
        self.enrollment_repo = Some(repo);
        self
    }

    pub fn attendance_repo(mut self, repo: Arc<dyn AttendanceRepository>) -> Self {
        self.attendance_repo = Some(repo);
        self
    }

    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    pub fn session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = Some(ttl);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let required = |name: &str| ServiceError::validation(format!("{name} is required"));

        Ok(ServiceContext {
            pool: self.pool,
            redis_pool: self.redis_pool,
            account_repo: self.account_repo.ok_or_else(|| required("account_repo"))?,
            class_repo: self.class_repo.ok_or_else(|| required("class_repo"))?,
            enrollment_repo: self
                .enrollment_repo
                .ok_or_else(|| required("enrollment_repo"))?,
            attendance_repo: self
                .attendance_repo
                .ok_or_else(|| required("attendance_repo"))?,
            session_store: self.session_store.ok_or_else(|| required("session_store"))?,
            session_ttl: self
                .session_ttl
                .unwrap_or_else(|| Duration::seconds(DEFAULT_SESSION_TTL_SECONDS)),
            password_service: PasswordService::new(),
            snowflake_generator: self
                .snowflake_generator
                .ok_or_else(|| required("snowflake_generator"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_reports_missing_dependency() {
        let err = ServiceContextBuilder::new()
            .account_repo(Arc::new(MemoryAccountRepository::new()))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("class_repo is required"));
    }

    #[test]
    fn test_builder_defaults_session_ttl() {
        let ctx = ServiceContextBuilder::new()
            .account_repo(Arc::new(MemoryAccountRepository::new()))
            .class_repo(Arc::new(MemoryClassRepository::new()))
            .enrollment_repo(Arc::new(MemoryEnrollmentRepository::new()))
            .attendance_repo(Arc::new(MemoryAttendanceRepository::new()))
            .session_store(Arc::new(MemorySessionStore::new()))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .build()
            .unwrap();
        assert_eq!(ctx.session_ttl(), Duration::hours(8));
        assert!(ctx.pool().is_none());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let ctx = ServiceContext::in_memory(0);
        assert_ne!(ctx.generate_id(), ctx.generate_id());
    }
}
