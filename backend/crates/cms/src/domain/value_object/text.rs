//! Free-text field helpers

use crate::error::{CmsError, CmsResult};

/// Trimmed, non-empty, at most `max` characters
pub fn required(field: &str, raw: &str, max: usize) -> CmsResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(CmsError::invalid(format!("{field} is required")));
    }
    check_length(field, value, max)?;
    Ok(value.to_string())
}

/// Blank becomes `None`
pub fn optional(field: &str, raw: Option<&str>, max: usize) -> CmsResult<Option<String>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => {
            check_length(field, value, max)?;
            Ok(Some(value.to_string()))
        }
        None => Ok(None),
    }
}

/// Loose shape check; these addresses are never used to log in
pub fn email(field: &str, raw: &str) -> CmsResult<String> {
    let value = required(field, raw, 254)?.to_lowercase();
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(value),
        _ => Err(CmsError::invalid(format!("{field} is not a valid email"))),
    }
}

fn check_length(field: &str, value: &str, max: usize) -> CmsResult<()> {
    if value.chars().count() > max {
        return Err(CmsError::invalid(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}
