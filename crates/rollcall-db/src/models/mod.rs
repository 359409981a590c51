//! Database models - SQLx-compatible structs for PostgreSQL tables

mod account;
mod attendance;
mod class;
mod enrollment;

pub use account::AccountModel;
pub use attendance::AttendanceModel;
pub use class::ClassModel;
pub use enrollment::EnrollmentModel;
