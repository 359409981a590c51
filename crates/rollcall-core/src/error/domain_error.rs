//! Domain errors - the error taxonomy shared by every store and service

use thiserror::Error;

/// Domain layer errors
///
/// `NotFound` deliberately carries only the resource kind. It is returned both
/// for missing resources and for resources the actor may not see, so the
/// message must never reveal an identifier.
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("{0} not found")]
    NotFound(&'static str),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    // =========================================================================
    // Authentication / Authorization Errors
    // =========================================================================
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Access denied")]
    AccessDenied,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("An account with this {0} already exists")]
    DuplicateIdentity(&'static str),

    #[error("Roll number is already enrolled in this class")]
    DuplicateEnrollment,

    #[error("Join code already exists")]
    JoinCodeExists,

    // =========================================================================
    // Batch Errors
    // =========================================================================
    #[error("Batch partially applied: {failed} of {total} records failed")]
    PartialBatchFailure { failed: usize, total: usize },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::WeakPassword(_) => "WEAK_PASSWORD",

            // Auth
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::AccessDenied => "ACCESS_DENIED",

            // Conflict
            Self::DuplicateIdentity(_) => "DUPLICATE_IDENTITY",
            Self::DuplicateEnrollment => "DUPLICATE_ENROLLMENT",
            Self::JoinCodeExists => "JOIN_CODE_EXISTS",

            Self::PartialBatchFailure { .. } => "PARTIAL_BATCH_FAILURE",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::InvalidUsername(_)
                | Self::WeakPassword(_)
        )
    }

    /// Check if this is an authentication error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::Unauthenticated)
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::AccessDenied)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateIdentity(_) | Self::DuplicateEnrollment | Self::JoinCodeExists
        )
    }

    /// Check if this error comes from infrastructure rather than the caller
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError(_) | Self::CacheError(_) | Self::InternalError(_)
        )
    }
}
