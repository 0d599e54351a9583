//! Upper-cased classification codes
//!
//! Member plans, product categories and product types are free-form codes
//! chosen by the site owner (`PREMIUM`, `COURSE`, `EBOOK`, ...). They are
//! compared case-insensitively by always storing them upper-cased.

use derive_more::Display;

use crate::error::{CmsError, CmsResult};

pub const CODE_MAX_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct Code(String);

impl Code {
    /// `field` names the input in the error message
    pub fn new(field: &str, raw: &str) -> CmsResult<Self> {
        let code = raw.trim().to_ascii_uppercase();

        if code.is_empty() {
            return Err(CmsError::invalid(format!("{field} is required")));
        }
        if code.len() > CODE_MAX_LENGTH {
            return Err(CmsError::invalid(format!(
                "{field} must be at most {CODE_MAX_LENGTH} characters"
            )));
        }
        if !code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' || c == '-')
        {
            return Err(CmsError::invalid(format!(
                "{field} may only contain letters, digits, '_' and '-'"
            )));
        }

        Ok(Self(code))
    }

    pub fn from_db(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_cased() {
        assert_eq!(Code::new("Plan", " premium ").unwrap().as_str(), "PREMIUM");
        assert_eq!(Code::new("Type", "e-book").unwrap().as_str(), "E-BOOK");
    }

    #[test]
    fn test_rejects_blank_and_symbols() {
        let err = Code::new("Plan", "  ").unwrap_err();
        assert_eq!(err.to_string(), "Plan is required");
        assert!(Code::new("Plan", "gold plan").is_err());
    }
}
