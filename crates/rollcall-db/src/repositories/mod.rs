//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in rollcall-core.

mod account;
mod attendance;
mod class;
mod enrollment;
mod error;

pub use account::PgAccountRepository;
pub use attendance::PgAttendanceRepository;
pub use class::PgClassRepository;
pub use enrollment::PgEnrollmentRepository;
