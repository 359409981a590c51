//! Attendance handlers

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use rollcall_service::{
    AttendanceDayResponse, AttendanceRecordResponse, AttendanceService, MarkAttendanceRequest,
};

use crate::extractors::{AuthUser, ClassDatePath, ClassIdPath, ClassStudentPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Dates with attendance, newest first
///
/// GET /classes/{id}/attendance
pub async fn list_dates(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ClassIdPath>,
) -> ApiResult<Json<Vec<NaiveDate>>> {
    let service = AttendanceService::new(state.service_context());
    let dates = service.dates(&auth.actor(), path.class_id()?).await?;
    Ok(Json(dates))
}

/// GET /classes/{id}/attendance/{date}
pub async fn get_day(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ClassDatePath>,
) -> ApiResult<Json<AttendanceDayResponse>> {
    let service = AttendanceService::new(state.service_context());
    let day = service
        .day(&auth.actor(), path.class_id()?, path.date()?)
        .await?;
    Ok(Json(day))
}

/// Replace the attendance of a date
///
/// PUT /classes/{id}/attendance/{date}
pub async fn mark_day(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ClassDatePath>,
    ValidatedJson(request): ValidatedJson<MarkAttendanceRequest>,
) -> ApiResult<Json<AttendanceDayResponse>> {
    let service = AttendanceService::new(state.service_context());
    let day = service
        .mark_bulk(&auth.actor(), path.class_id()?, path.date()?, request)
        .await?;
    Ok(Json(day))
}

/// GET /classes/{id}/students/{student_id}/attendance
pub async fn student_records(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ClassStudentPath>,
) -> ApiResult<Json<Vec<AttendanceRecordResponse>>> {
    let service = AttendanceService::new(state.service_context());
    let records = service
        .student_records(&auth.actor(), path.class_id()?, path.student_id()?)
        .await?;
    Ok(Json(records))
}
