//! Account administration handlers
//!
//! Admin-only endpoints; the access policy refuses everyone else with 403.

use axum::{
    extract::{Path, State},
    Json,
};
use rollcall_service::{AccountResponse, IdentityService, RegisterRequest};

use crate::extractors::{AccountIdPath, AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List every account
///
/// GET /admin/accounts
pub async fn list_accounts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<AccountResponse>>> {
    let service = IdentityService::new(state.service_context());
    let accounts = service.list_accounts(&auth.actor()).await?;
    Ok(Json(accounts))
}

/// Provision an account of any role
///
/// POST /admin/accounts
pub async fn provision_account(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<AccountResponse>>> {
    let service = IdentityService::new(state.service_context());
    let account = service.provision(&auth.actor(), request).await?;
    Ok(Created(Json(account)))
}

/// POST /admin/accounts/{id}/deactivate
pub async fn deactivate_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<AccountIdPath>,
) -> ApiResult<Json<AccountResponse>> {
    let service = IdentityService::new(state.service_context());
    let account = service.deactivate(&auth.actor(), path.account_id()?).await?;
    Ok(Json(account))
}

/// POST /admin/accounts/{id}/reactivate
pub async fn reactivate_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<AccountIdPath>,
) -> ApiResult<Json<AccountResponse>> {
    let service = IdentityService::new(state.service_context());
    let account = service.reactivate(&auth.actor(), path.account_id()?).await?;
    Ok(Json(account))
}
