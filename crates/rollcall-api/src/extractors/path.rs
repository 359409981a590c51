//! Path parameter extractors
//!
//! Snowflake ids arrive as strings and are parsed here so a malformed id is a
//! 400 rather than a lookup miss.

use chrono::NaiveDate;
use rollcall_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

fn parse_id(raw: &str, field: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {field} format")))
}

/// Path parameters with class id
#[derive(Debug, Deserialize)]
pub struct ClassIdPath {
    pub id: String,
}

impl ClassIdPath {
    pub fn class_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.id, "class id")
    }
}

/// Path parameters with class id and student id
#[derive(Debug, Deserialize)]
pub struct ClassStudentPath {
    pub id: String,
    pub student_id: String,
}

impl ClassStudentPath {
    pub fn class_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.id, "class id")
    }

    pub fn student_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.student_id, "student id")
    }
}

/// Path parameters with class id and an ISO date
#[derive(Debug, Deserialize)]
pub struct ClassDatePath {
    pub id: String,
    pub date: String,
}

impl ClassDatePath {
    pub fn class_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.id, "class id")
    }

    /// `YYYY-MM-DD`
    pub fn date(&self) -> Result<NaiveDate, ApiError> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| ApiError::invalid_path("Invalid date, expected YYYY-MM-DD"))
    }
}

/// Path parameters with account id
#[derive(Debug, Deserialize)]
pub struct AccountIdPath {
    pub id: String,
}

impl AccountIdPath {
    pub fn account_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.id, "account id")
    }
}

/// Path parameters with roll number
#[derive(Debug, Deserialize)]
pub struct RollNoPath {
    pub roll_no: String,
}
