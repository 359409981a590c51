//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod accounts;
pub mod admin;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod health;
pub mod lookup;
pub mod reports;
pub mod students;
