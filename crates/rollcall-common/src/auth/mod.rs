//! Authentication utilities

mod password;
mod token;

pub use password::{
    hash_password, validate_password_strength, verify_password, PasswordService,
    MAX_PASSWORD_LEN, MIN_PASSWORD_LEN,
};
pub use token::{generate_session_token, SESSION_TOKEN_LEN};
