//! In-memory repositories
//!
//! Process-local implementations of the repository traits, guarded by
//! `parking_lot::RwLock`. They enforce the same uniqueness rules as the
//! Postgres schema and back the test suites and `STORAGE_BACKEND=memory`.

mod account;
mod attendance;
mod class;
mod enrollment;

pub use account::MemoryAccountRepository;
pub use attendance::MemoryAttendanceRepository;
pub use class::MemoryClassRepository;
pub use enrollment::MemoryEnrollmentRepository;
