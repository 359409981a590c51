//! Ports implemented by the infrastructure crates

mod repositories;

pub use repositories::{
    AccountRepository, AttendanceRepository, ClassRepository, EnrollmentRepository, RepoResult,
    SessionStore,
};
