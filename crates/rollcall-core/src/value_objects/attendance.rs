//! Attendance status, percentage arithmetic, and reporting bands

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Percentage at or above which attendance is "good"
pub const GOOD_THRESHOLD: f64 = 75.0;

/// Percentage at or above which attendance is "warning" rather than "danger"
pub const WARNING_THRESHOLD: f64 = 60.0;

/// Students strictly below this percentage are defaulters
pub const DEFAULTER_THRESHOLD: f64 = 75.0;

/// Presence mark for one student on one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    #[default]
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }

    #[inline]
    pub fn is_present(self) -> bool {
        matches!(self, Self::Present)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            other => Err(DomainError::ValidationError(format!(
                "unknown attendance status '{other}'"
            ))),
        }
    }
}

/// Classification of an attendance percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceBand {
    Good,
    Warning,
    Danger,
}

impl AttendanceBand {
    /// Classify an unrounded percentage
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= GOOD_THRESHOLD {
            Self::Good
        } else if percentage >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Danger
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for AttendanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `present / total * 100`, clamped to `[0, 100]`; zero when nothing was held
pub fn attendance_percentage(present: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let present = present.clamp(0, total);
    present as f64 / total as f64 * 100.0
}

/// Whether a percentage puts a student on the defaulters list
#[inline]
pub fn is_defaulter(percentage: f64) -> bool {
    percentage < DEFAULTER_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(AttendanceBand::from_percentage(100.0), AttendanceBand::Good);
        assert_eq!(AttendanceBand::from_percentage(75.0), AttendanceBand::Good);
        assert_eq!(AttendanceBand::from_percentage(74.999), AttendanceBand::Warning);
        assert_eq!(AttendanceBand::from_percentage(60.0), AttendanceBand::Warning);
        assert_eq!(AttendanceBand::from_percentage(59.999), AttendanceBand::Danger);
        assert_eq!(AttendanceBand::from_percentage(0.0), AttendanceBand::Danger);
    }

    #[test]
    fn test_percentage_zero_total() {
        assert!(attendance_percentage(0, 0).abs() < f64::EPSILON);
        assert!(attendance_percentage(3, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percentage_range() {
        assert!((attendance_percentage(1, 1) - 100.0).abs() < f64::EPSILON);
        assert!((attendance_percentage(1, 4) - 25.0).abs() < f64::EPSILON);
        assert!((attendance_percentage(9, 4) - 100.0).abs() < f64::EPSILON);
        assert!(attendance_percentage(-1, 4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_defaulter_threshold() {
        assert!(is_defaulter(74.99));
        assert!(!is_defaulter(75.0));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Present".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Present);
        assert_eq!(AttendanceStatus::default(), AttendanceStatus::Absent);
        assert!("late".parse::<AttendanceStatus>().is_err());
    }
}
