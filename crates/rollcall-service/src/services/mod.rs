//! Business logic services
//!
//! Each service borrows the [`ServiceContext`] for the duration of a call and
//! routes every permission check through [`access::decide`].

pub mod access;
mod attendance;
mod class;
mod context;
mod enrollment;
mod error;
pub mod export;
mod identity;
mod report;

pub use access::{decide, AccessScope, AccessService, Decision, Denial, Resource};
pub use attendance::AttendanceService;
pub use class::ClassService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use enrollment::EnrollmentService;
pub use error::{ServiceError, ServiceResult};
pub use identity::IdentityService;
pub use report::{ReportService, Tally};
