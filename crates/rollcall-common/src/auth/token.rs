//! Opaque session tokens

use rand::distributions::Alphanumeric;
use rand::Rng;

pub const SESSION_TOKEN_LEN: usize = 48;

/// Generate a random session token
pub fn generate_session_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_TOKEN_LEN)
        .map(char::from)
        .collect()
}
