//! Domain entities - core business objects

mod account;
mod attendance;
mod class;
mod enrollment;
mod session;

pub use account::Account;
pub use attendance::AttendanceRecord;
pub use class::ClassRecord;
pub use enrollment::{normalize_roll_no, EnrollmentRecord, MAX_ROLL_NO_LEN};
pub use session::Session;
