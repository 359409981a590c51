//! Value objects - immutable types that represent domain concepts

mod actions;
mod attendance;
mod join_code;
mod role;
mod snowflake;

pub use actions::Actions;
pub use attendance::{
    attendance_percentage, is_defaulter, AttendanceBand, AttendanceStatus, DEFAULTER_THRESHOLD,
    GOOD_THRESHOLD, WARNING_THRESHOLD,
};
pub use join_code::JoinCode;
pub use role::{Actor, Role};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
