//! Class handlers
//!
//! Endpoints for class creation, joining by code, and management.

use axum::{
    extract::{Path, State},
    Json,
};
use rollcall_service::{
    ClassResponse, ClassService, CreateClassRequest, JoinClassRequest, JoinClassResponse,
    UpdateClassRequest,
};

use crate::extractors::{AuthUser, ClassIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List classes visible to the caller
///
/// GET /classes
pub async fn list_classes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ClassResponse>>> {
    let service = ClassService::new(state.service_context());
    let classes = service.list_classes(&auth.actor()).await?;
    Ok(Json(classes))
}

/// Create a new class
///
/// POST /classes
pub async fn create_class(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateClassRequest>,
) -> ApiResult<Created<Json<ClassResponse>>> {
    let service = ClassService::new(state.service_context());
    let class = service.create_class(&auth.actor(), request).await?;
    Ok(Created(Json(class)))
}

/// Join a class as a teacher using its code
///
/// POST /classes/join
pub async fn join_class(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<JoinClassRequest>,
) -> ApiResult<Json<JoinClassResponse>> {
    let service = ClassService::new(state.service_context());
    let response = service.join_by_code(&auth.actor(), request).await?;
    Ok(Json(response))
}

/// GET /classes/{id}
pub async fn get_class(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ClassIdPath>,
) -> ApiResult<Json<ClassResponse>> {
    let service = ClassService::new(state.service_context());
    let class = service.get_class(&auth.actor(), path.class_id()?).await?;
    Ok(Json(class))
}

/// Update class details
///
/// PATCH /classes/{id}
pub async fn update_class(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ClassIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateClassRequest>,
) -> ApiResult<Json<ClassResponse>> {
    let service = ClassService::new(state.service_context());
    let class = service
        .update_class(&auth.actor(), path.class_id()?, request)
        .await?;
    Ok(Json(class))
}

/// Delete a class with its roster and attendance
///
/// DELETE /classes/{id}
pub async fn delete_class(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ClassIdPath>,
) -> ApiResult<NoContent> {
    let service = ClassService::new(state.service_context());
    service.delete_class(&auth.actor(), path.class_id()?).await?;
    Ok(NoContent)
}
