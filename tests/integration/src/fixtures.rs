//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests. Identifiers travel as
//! strings on the wire.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

// ============================================================================
// Accounts
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: String,
}

impl RegisterRequest {
    pub fn teacher() -> Self {
        Self::unique("teacher")
    }

    pub fn student() -> Self {
        Self::unique("student")
    }

    fn unique(role: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("{role}{suffix}"),
            email: format!("{role}{suffix}@school.test"),
            password: "TestPass123".to_string(),
            full_name: format!("Test {role} {suffix}"),
            role: role.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(login: &str, password: &str) -> Self {
        Self {
            login: login.to_string(),
            password: password.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub account: AccountResponse,
}

// ============================================================================
// Classes
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub room: String,
    pub subject: String,
}

impl CreateClassRequest {
    pub fn math101() -> Self {
        Self {
            name: "Math101".to_string(),
            room: "12".to_string(),
            subject: "Math".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ClassResponse {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub created_by: String,
    pub teacher_ids: Vec<String>,
    pub class_code: String,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct JoinClassRequest {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct JoinClassResponse {
    pub class: ClassResponse,
    pub already_member: bool,
    pub warning: Option<String>,
}

// ============================================================================
// Roster
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AddStudentRequest {
    pub name: String,
    pub roll_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl AddStudentRequest {
    pub fn new(name: &str, roll_no: &str) -> Self {
        Self {
            name: name.to_string(),
            roll_no: roll_no.to_string(),
            email: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BulkAddStudentsRequest {
    pub students: Vec<AddStudentRequest>,
}

#[derive(Debug, Deserialize)]
pub struct StudentResponse {
    pub id: String,
    pub name: String,
    pub roll_no: String,
    pub email: Option<String>,
    pub class_id: String,
}

#[derive(Debug, Deserialize)]
pub struct BulkRowResult {
    pub index: usize,
    pub roll_no: String,
    pub outcome: String,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkAddResponse {
    pub added: usize,
    pub duplicates: usize,
    pub errors: usize,
    pub rows: Vec<BulkRowResult>,
}

// ============================================================================
// Attendance
// ============================================================================

#[derive(Debug, Serialize)]
pub struct MarkAttendanceRequest {
    pub lectures: i32,
    pub statuses: HashMap<String, String>,
}

impl MarkAttendanceRequest {
    /// Rolls listed are present, everyone else absent
    pub fn present(lectures: i32, rolls: &[&str]) -> Self {
        Self {
            lectures,
            statuses: rolls
                .iter()
                .map(|roll| ((*roll).to_string(), "present".to_string()))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AttendanceEntry {
    pub roll_no: String,
    pub status: String,
    pub lectures: i32,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceDayResponse {
    pub class_id: String,
    pub date: String,
    pub present: usize,
    pub absent: usize,
    pub entries: Vec<AttendanceEntry>,
}

// ============================================================================
// Reports
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ClassAttendance {
    pub class_name: String,
    pub present: i64,
    pub total: i64,
    pub percentage: f64,
    pub band: String,
}

#[derive(Debug, Deserialize)]
pub struct StudentSummaryResponse {
    pub roll_no: String,
    pub name: Option<String>,
    pub classes: Vec<ClassAttendance>,
    pub overall_percentage: f64,
    pub band: String,
}

#[derive(Debug, Deserialize)]
pub struct StudentReportRow {
    pub roll_no: String,
    pub present: i64,
    pub total: i64,
    pub percentage: f64,
    pub band: String,
    pub is_defaulter: bool,
}

#[derive(Debug, Deserialize)]
pub struct ClassReportResponse {
    pub class_name: String,
    pub lectures_held: i64,
    pub average_percentage: f64,
    pub students: Vec<StudentReportRow>,
    pub defaulters: Vec<String>,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
