//! Axum extractors for request handling
//!
//! Custom extractors for session authentication, validation, and path ids.

mod auth;
mod path;
mod validated;

pub use auth::AuthUser;
pub use path::{AccountIdPath, ClassDatePath, ClassIdPath, ClassStudentPath, RollNoPath};
pub use validated::ValidatedJson;
