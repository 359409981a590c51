//! Entity to model mappers
//!
//! Conversions from database rows (`models`) to domain entities
//! (`rollcall-core`).

mod account;
mod attendance;
mod class;
mod enrollment;

pub use account::parse_role;
pub use class::{ids_from_db, ids_to_db};
