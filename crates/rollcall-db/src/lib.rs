//! # rollcall-db
//!
//! Persistence for accounts, classes, enrollments, and attendance.
//!
//! Two implementations of every repository trait from `rollcall-core`:
//!
//! - `repositories`: PostgreSQL through SQLx, with the schema under
//!   `migrations/` applied by [`run_migrations`]
//! - `memory`: process-local stores for tests and `STORAGE_BACKEND=memory`
//!
//! ```rust,ignore
//! use rollcall_db::{create_pool, run_migrations, DatabaseConfig, PgClassRepository};
//!
//! let pool = create_pool(&DatabaseConfig::default()).await?;
//! run_migrations(&pool).await?;
//! let classes = PgClassRepository::new(pool);
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{
    MemoryAccountRepository, MemoryAttendanceRepository, MemoryClassRepository,
    MemoryEnrollmentRepository,
};
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgAccountRepository, PgAttendanceRepository, PgClassRepository, PgEnrollmentRepository,
};
