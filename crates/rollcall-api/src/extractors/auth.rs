//! Authentication extractor
//!
//! Resolves the bearer session token from the Authorization header into the
//! calling account.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use rollcall_core::{Account, Actor};
use rollcall_service::IdentityService;

use crate::response::ApiError;
use crate::state::AppState;

/// Account behind a live session
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub account: Account,
    /// Session token the request was made with
    pub token: String,
}

impl AuthUser {
    /// The caller as seen by the access policy
    pub fn actor(&self) -> Actor {
        Actor::account(self.account.id, self.account.role)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let account = IdentityService::new(app_state.service_context())
            .resolve_session(bearer.token())
            .await
            .map_err(|e| {
                if e.status_code() == 401 {
                    tracing::debug!(error = %e, "Rejected session token");
                    ApiError::InvalidSession
                } else {
                    ApiError::Service(e)
                }
            })?;

        Ok(Self {
            account,
            token: bearer.token().to_string(),
        })
    }
}
