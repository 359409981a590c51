//! Roster handlers
//!
//! Endpoints for enrolling and removing students, including anonymous
//! self-registration.

use axum::{
    extract::{Path, State},
    Json,
};
use rollcall_service::{
    AddStudentRequest, BulkAddResponse, BulkAddStudentsRequest, EnrollmentService,
    SelfRegisterRequest, StudentResponse,
};

use crate::extractors::{AuthUser, ClassIdPath, ClassStudentPath, ValidatedJson};
use crate::response::{ApiResult, BatchOutcome, Created, NoContent};
use crate::state::AppState;

/// Class roster ordered by roll number
///
/// GET /classes/{id}/students
pub async fn list_students(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ClassIdPath>,
) -> ApiResult<Json<Vec<StudentResponse>>> {
    let service = EnrollmentService::new(state.service_context());
    let students = service.list_students(&auth.actor(), path.class_id()?).await?;
    Ok(Json(students))
}

/// POST /classes/{id}/students
pub async fn add_student(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ClassIdPath>,
    ValidatedJson(request): ValidatedJson<AddStudentRequest>,
) -> ApiResult<Created<Json<StudentResponse>>> {
    let service = EnrollmentService::new(state.service_context());
    let student = service
        .add_student(&auth.actor(), path.class_id()?, request)
        .await?;
    Ok(Created(Json(student)))
}

/// Add many students; 207 when any row failed for a reason other than a
/// duplicate
///
/// POST /classes/{id}/students/bulk
pub async fn add_students_bulk(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ClassIdPath>,
    ValidatedJson(request): ValidatedJson<BulkAddStudentsRequest>,
) -> ApiResult<BatchOutcome<BulkAddResponse>> {
    let service = EnrollmentService::new(state.service_context());
    let report = service
        .add_bulk(&auth.actor(), path.class_id()?, request)
        .await?;
    Ok(BatchOutcome {
        partial: report.failure().is_some(),
        body: report,
    })
}

/// Remove a student and their attendance in this class
///
/// DELETE /classes/{id}/students/{student_id}
pub async fn remove_student(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ClassStudentPath>,
) -> ApiResult<NoContent> {
    let service = EnrollmentService::new(state.service_context());
    service
        .remove_student(&auth.actor(), path.class_id()?, path.student_id()?)
        .await?;
    Ok(NoContent)
}

/// Anonymous self-registration
///
/// POST /classes/{id}/register
pub async fn self_register(
    State(state): State<AppState>,
    Path(path): Path<ClassIdPath>,
    ValidatedJson(request): ValidatedJson<SelfRegisterRequest>,
) -> ApiResult<Created<Json<StudentResponse>>> {
    let service = EnrollmentService::new(state.service_context());
    let student = service.self_register(path.class_id()?, request).await?;
    Ok(Created(Json(student)))
}
