//! Class join codes

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::DomainError;

/// Short uppercase alphanumeric code a teacher uses to attach to a class
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinCode(String);

impl JoinCode {
    /// Length of freshly generated codes
    pub const GENERATED_LEN: usize = 6;
    pub const MIN_LEN: usize = 6;
    pub const MAX_LEN: usize = 8;

    const CHARSET: &'static [u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    /// Sample a new random code
    pub fn generate() -> Self {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        let code = (0..Self::GENERATED_LEN)
            .map(|_| Self::CHARSET[rng.gen_range(0..Self::CHARSET.len())] as char)
            .collect();
        Self(code)
    }

    /// Parse user input; surrounding whitespace is ignored and letters are uppercased
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let code = input.trim().to_ascii_uppercase();
        let len_ok = (Self::MIN_LEN..=Self::MAX_LEN).contains(&code.len());
        if !len_ok || !code.bytes().all(|b| Self::CHARSET.contains(&b)) {
            return Err(DomainError::ValidationError(format!(
                "join code must be {}-{} letters or digits",
                Self::MIN_LEN,
                Self::MAX_LEN
            )));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for JoinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for JoinCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for JoinCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        JoinCode::parse(&raw).map_err(serde::de::Error::custom)
    }
}
