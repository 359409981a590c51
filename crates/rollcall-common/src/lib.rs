//! # rollcall-common
//!
//! Shared utilities including configuration, error handling, password
//! hashing, session tokens, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    generate_session_token, hash_password, validate_password_strength, verify_password,
    PasswordService, SESSION_TOKEN_LEN,
};
pub use config::{
    AdminBootstrap, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    RedisConfig, ServerConfig, SessionConfig, SnowflakeConfig, StorageBackend,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
