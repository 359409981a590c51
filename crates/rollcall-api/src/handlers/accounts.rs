//! Account handlers

use axum::Json;
use rollcall_service::AccountResponse;

use crate::extractors::AuthUser;

/// Get the current account
///
/// GET /accounts/@me
pub async fn get_current_account(auth: AuthUser) -> Json<AccountResponse> {
    Json(AccountResponse::from(&auth.account))
}
