//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AddStudentRequest, BulkAddStudentsRequest, CreateClassRequest, JoinClassRequest,
    LoginRequest, MarkAttendanceRequest, RegisterRequest, SelfRegisterRequest,
    UpdateClassRequest,
};

pub use responses::{
    AccountResponse, AttendanceDayResponse, AttendanceEntry, AttendanceRecordResponse,
    BulkAddResponse, BulkOutcome, BulkRowResult, ClassAttendance, ClassReportResponse,
    ClassResponse, HealthChecks, HealthResponse, JoinClassResponse, LoginResponse,
    ReadinessResponse, StudentReportRow, StudentResponse, StudentSummaryResponse,
};
