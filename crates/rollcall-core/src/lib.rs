//! # rollcall-core
//!
//! Domain layer containing entities, value objects, and repository traits for
//! class rosters and attendance. This crate has zero dependencies on
//! infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    normalize_roll_no, Account, AttendanceRecord, ClassRecord, EnrollmentRecord, Session,
};
pub use error::DomainError;
pub use traits::{
    AccountRepository, AttendanceRepository, ClassRepository, EnrollmentRepository, RepoResult,
    SessionStore,
};
pub use value_objects::{
    attendance_percentage, Actions, Actor, AttendanceBand, AttendanceStatus, JoinCode, Role,
    Snowflake, SnowflakeGenerator, SnowflakeParseError, DEFAULTER_THRESHOLD,
};
