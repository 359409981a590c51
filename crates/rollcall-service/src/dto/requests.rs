//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use std::collections::HashMap;

use rollcall_core::{AttendanceStatus, Role};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Usernames: 3-32 characters of `[A-Za-z0-9_.-]`
fn validate_username(username: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-');
    if username.chars().all(allowed) {
        Ok(())
    } else {
        Err(ValidationError::new("username_charset").with_message(
            "Username may only contain letters, digits, '_', '.' and '-'".into(),
        ))
    }
}

// ============================================================================
// Account Requests
// ============================================================================

/// Account creation, used by public registration and admin provisioning
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 32, message = "Username must be 3-32 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Strength is checked by the identity service
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: String,

    pub role: Role,
}

/// Login with a username or an email address
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254, message = "Login is required"))]
    pub login: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Class Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateClassRequest {
    #[validate(length(min = 1, max = 100, message = "Class name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "Room must be 1-50 characters"))]
    pub room: String,

    #[validate(length(min = 1, max = 100, message = "Subject must be 1-100 characters"))]
    pub subject: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// Partial update; the join code and creator cannot change
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateClassRequest {
    #[validate(length(min = 1, max = 100, message = "Class name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Room must be 1-50 characters"))]
    pub room: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Subject must be 1-100 characters"))]
    pub subject: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct JoinClassRequest {
    #[validate(length(min = 1, max = 16, message = "Class code is required"))]
    pub code: String,
}

// ============================================================================
// Enrollment Requests
// ============================================================================

/// One student row, also used per row of a bulk add
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AddStudentRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 32, message = "Roll number must be 1-32 characters"))]
    pub roll_no: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,
}

/// Rows are validated one by one so a bad row does not reject the batch
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct BulkAddStudentsRequest {
    #[validate(length(min = 1, max = 500, message = "Provide 1-500 students"))]
    pub students: Vec<AddStudentRequest>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SelfRegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 32, message = "Roll number must be 1-32 characters"))]
    pub roll_no: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

impl From<SelfRegisterRequest> for AddStudentRequest {
    fn from(request: SelfRegisterRequest) -> Self {
        Self {
            name: request.name,
            roll_no: request.roll_no,
            email: request.email,
            phone: None,
        }
    }
}

// ============================================================================
// Attendance Requests
// ============================================================================

/// Marks for one class on one date. Students missing from `statuses` are absent.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct MarkAttendanceRequest {
    #[validate(range(min = 1, max = 12, message = "Lectures must be between 1 and 12"))]
    pub lectures: i32,

    /// Status per roll number
    #[serde(default)]
    pub statuses: HashMap<String, AttendanceStatus>,
}
