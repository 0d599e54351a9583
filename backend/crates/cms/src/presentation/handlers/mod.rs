//! HTTP Handlers
//!
//! `admin` handlers sit behind the admin gate; `public` handlers are open.

pub mod admin;
pub mod public;

use std::sync::Arc;

use crate::domain::value_object::Code;
use crate::error::CmsResult;

/// Shared state for content handlers
pub struct CmsAppState<R> {
    pub repo: Arc<R>,
}

impl<R> Clone for CmsAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

/// Blank query values count as absent
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn code_filter(field: &str, value: Option<String>) -> CmsResult<Option<Code>> {
    non_blank(value).map(|v| Code::new(field, &v)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_filter() {
        assert_eq!(code_filter("Plan", None).unwrap(), None);
        assert_eq!(code_filter("Plan", Some("  ".into())).unwrap(), None);
        assert_eq!(
            code_filter("Plan", Some("premium".into())).unwrap(),
            Some(Code::from_db("PREMIUM"))
        );
        assert!(code_filter("Plan", Some("no spaces allowed".into())).is_err());
    }
}
