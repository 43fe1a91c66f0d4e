//! Username validation utilities

use crate::error::{Result, UsernameForgeError};
use regex::Regex;

/// Rejects candidates that could not be embedded verbatim in a URL path
pub struct UsernameValidator {
    pattern: Regex,
}

impl UsernameValidator {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(r"^[a-z0-9]+$")
            .map_err(|e| UsernameForgeError::internal(e.to_string()))?;
        Ok(Self { pattern })
    }

    pub fn validate(&self, username: &str) -> Result<()> {
        if username.is_empty() {
            return Err(UsernameForgeError::validation("Username cannot be empty"));
        }

        if !self.pattern.is_match(username) {
            return Err(UsernameForgeError::validation(format!(
                "Username '{}' contains characters outside a-z and 0-9",
                username
            )));
        }

        Ok(())
    }
}
