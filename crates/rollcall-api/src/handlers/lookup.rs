//! Roll-number lookup
//!
//! Students have no accounts of their own; knowing a roll number grants
//! read-only access to that roll's attendance.

use axum::{
    extract::{Path, State},
    Json,
};
use rollcall_core::Actor;
use rollcall_service::{ReportService, StudentSummaryResponse};

use crate::extractors::RollNoPath;
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /lookup/{roll_no}
pub async fn student_summary(
    State(state): State<AppState>,
    Path(path): Path<RollNoPath>,
) -> ApiResult<Json<StudentSummaryResponse>> {
    let roll_no = path.roll_no.trim().to_string();
    let actor = Actor::RollNumber(roll_no.clone());
    let service = ReportService::new(state.service_context());
    let summary = service.student_summary(&actor, &roll_no).await?;
    Ok(Json(summary))
}
