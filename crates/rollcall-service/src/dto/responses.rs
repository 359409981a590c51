//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Snowflake IDs
//! serialize as strings.

use chrono::{DateTime, NaiveDate, Utc};
use rollcall_core::{AttendanceBand, AttendanceStatus, DomainError, Role, Snowflake};
use serde::{Deserialize, Serialize};

// ============================================================================
// Account Responses
// ============================================================================

/// Account without credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Issued session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub account: AccountResponse,
}

// ============================================================================
// Class Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassResponse {
    pub id: Snowflake,
    pub name: String,
    pub room: String,
    pub subject: String,
    pub description: Option<String>,
    pub created_by: Snowflake,
    pub teacher_ids: Vec<Snowflake>,
    pub class_code: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of joining a class by code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinClassResponse {
    pub class: ClassResponse,
    pub already_member: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

// ============================================================================
// Enrollment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentResponse {
    pub id: Snowflake,
    pub name: String,
    pub roll_no: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub class_id: Snowflake,
    pub class_ids: Vec<Snowflake>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkOutcome {
    Added,
    Duplicate,
    Error,
}

/// Outcome of one bulk row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkRowResult {
    pub index: usize,
    pub roll_no: String,
    pub outcome: BulkOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<StudentResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-row report of a bulk add
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkAddResponse {
    pub added: usize,
    pub duplicates: usize,
    pub errors: usize,
    pub rows: Vec<BulkRowResult>,
}

impl BulkAddResponse {
    pub fn push(&mut self, row: BulkRowResult) {
        match row.outcome {
            BulkOutcome::Added => self.added += 1,
            BulkOutcome::Duplicate => self.duplicates += 1,
            BulkOutcome::Error => self.errors += 1,
        }
        self.rows.push(row);
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    /// `PartialBatchFailure` when a row failed for a reason other than
    /// already being enrolled
    pub fn failure(&self) -> Option<DomainError> {
        (self.errors > 0).then(|| DomainError::PartialBatchFailure {
            failed: self.errors,
            total: self.total(),
        })
    }
}

// ============================================================================
// Attendance Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecordResponse {
    pub id: Snowflake,
    pub enrollment_id: Snowflake,
    pub class_id: Snowflake,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub lectures: i32,
}

/// One student's mark within a day sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub record_id: Snowflake,
    pub student_id: Snowflake,
    pub roll_no: String,
    pub name: String,
    pub status: AttendanceStatus,
    pub lectures: i32,
}

/// All marks of a class on one date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceDayResponse {
    pub class_id: Snowflake,
    pub date: NaiveDate,
    pub present: usize,
    pub absent: usize,
    pub entries: Vec<AttendanceEntry>,
}

// ============================================================================
// Report Responses
// ============================================================================

/// Attendance of one learner in one class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassAttendance {
    pub class_id: Snowflake,
    pub class_name: String,
    pub subject: String,
    /// Lectures attended
    pub present: i64,
    /// Lectures held while enrolled
    pub total: i64,
    pub days_present: i64,
    pub days_total: i64,
    pub percentage: f64,
    pub band: AttendanceBand,
}

/// Everything a roll number is enrolled in, with overall figures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentSummaryResponse {
    pub roll_no: String,
    pub name: Option<String>,
    pub classes: Vec<ClassAttendance>,
    pub overall_present: i64,
    pub overall_total: i64,
    pub overall_percentage: f64,
    pub band: AttendanceBand,
}

/// One roster row of a class report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentReportRow {
    pub student_id: Snowflake,
    pub roll_no: String,
    pub name: String,
    pub email: Option<String>,
    pub present: i64,
    pub total: i64,
    pub days_present: i64,
    pub days_total: i64,
    pub percentage: f64,
    pub band: AttendanceBand,
    pub is_defaulter: bool,
}

/// Class-wide attendance aggregate; the JSON and CSV exports format this
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassReportResponse {
    pub class_id: Snowflake,
    pub class_name: String,
    pub subject: String,
    pub lectures_held: i64,
    pub days_held: i64,
    pub average_percentage: f64,
    pub students: Vec<StudentReportRow>,
    /// Roll numbers below the defaulter threshold, in roster order
    pub defaulters: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl ClassReportResponse {
    pub fn defaulter_rows(&self) -> impl Iterator<Item = &StudentReportRow> {
        self.students.iter().filter(|row| row.is_defaulter)
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

fn check_label(check: Option<bool>) -> String {
    match check {
        Some(true) => "healthy",
        Some(false) => "unhealthy",
        None => "not_configured",
    }
    .to_string()
}

impl ReadinessResponse {
    /// `None` marks a backend that is not in use
    pub fn ready(database: Option<bool>, redis: Option<bool>) -> Self {
        let all_healthy = database.unwrap_or(true) && redis.unwrap_or(true);
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: check_label(database),
                redis: check_label(redis),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
