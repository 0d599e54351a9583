//! Display Name Value Object

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

pub const DISPLAY_NAME_MAX_LENGTH: usize = 100;

/// Human-readable account name shown in the admin UI and on posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct DisplayName(String);

impl DisplayName {
    /// Trimmed, non-empty, at most 100 characters, no control characters
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into().trim().to_string();

        if name.is_empty() {
            return Err(AppError::bad_request("Name is required"));
        }
        if name.chars().count() > DISPLAY_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Name must be at most {} characters",
                DISPLAY_NAME_MAX_LENGTH
            )));
        }
        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request("Name contains invalid characters"));
        }

        Ok(Self(name))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_trimmed() {
        assert_eq!(DisplayName::new("  Ada Lovelace ").unwrap().as_str(), "Ada Lovelace");
    }

    #[test]
    fn test_display_name_invalid() {
        assert!(DisplayName::new("   ").is_err());
        assert!(DisplayName::new("x".repeat(DISPLAY_NAME_MAX_LENGTH + 1)).is_err());
        assert!(DisplayName::new("bad\u{0000}name").is_err());
    }
}
