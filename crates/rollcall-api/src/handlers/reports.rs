//! Report handlers
//!
//! Both exports format the same class aggregate.

use axum::{
    extract::{Path, State},
    Json,
};
use rollcall_service::{export, ReportService};
use serde_json::Value;

use crate::extractors::{AuthUser, ClassIdPath};
use crate::response::{ApiResult, Csv};
use crate::state::AppState;

/// GET /classes/{id}/report
pub async fn class_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ClassIdPath>,
) -> ApiResult<Json<Value>> {
    let service = ReportService::new(state.service_context());
    let report = service.class_summary(&auth.actor(), path.class_id()?).await?;
    Ok(Json(export::to_json(&report)?))
}

/// GET /classes/{id}/report/csv
pub async fn class_report_csv(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ClassIdPath>,
) -> ApiResult<Csv> {
    let service = ReportService::new(state.service_context());
    let report = service.class_summary(&auth.actor(), path.class_id()?).await?;
    let body = export::to_csv(&report).await?;
    Ok(Csv {
        filename: format!("attendance-{}.csv", report.class_id),
        body,
    })
}
