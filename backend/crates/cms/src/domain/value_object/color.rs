//! Hex Color Value Object

use derive_more::Display;

use crate::error::{CmsError, CmsResult};

pub const DEFAULT_CATEGORY_COLOR: &str = "#3B82F6";
pub const DEFAULT_TAG_COLOR: &str = "#6B7280";

/// `#RGB` or `#RRGGBB`, stored upper-cased
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{_0}")]
pub struct HexColor(String);

impl HexColor {
    pub fn new(raw: &str) -> CmsResult<Self> {
        let raw = raw.trim();
        let digits = raw
            .strip_prefix('#')
            .ok_or_else(|| CmsError::invalid("Color must start with '#'"))?;

        if !matches!(digits.len(), 3 | 6) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CmsError::invalid("Color must look like #RGB or #RRGGBB"));
        }

        Ok(Self(format!("#{}", digits.to_ascii_uppercase())))
    }

    /// Given color, or `default` when absent or blank
    pub fn or_default(raw: Option<&str>, default: &str) -> CmsResult<Self> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(color) => Self::new(color),
            None => Ok(Self(default.to_string())),
        }
    }

    pub fn from_db(color: impl Into<String>) -> Self {
        Self(color.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
