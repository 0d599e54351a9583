//! Slug Value Object

use derive_more::Display;
use platform::slug::slugify;

use crate::error::{CmsError, CmsResult};

pub const SLUG_MAX_LENGTH: usize = 200;

/// URL path segment of a post, category, tag or product
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct Slug(String);

impl Slug {
    /// Normalise `raw` into a slug. Fails when nothing usable is left.
    pub fn new(raw: &str) -> CmsResult<Self> {
        let slug = slugify(raw);
        if slug.is_empty() {
            return Err(CmsError::invalid(
                "Slug must contain at least one letter or digit",
            ));
        }
        if slug.len() > SLUG_MAX_LENGTH {
            return Err(CmsError::invalid(format!(
                "Slug must be at most {SLUG_MAX_LENGTH} characters"
            )));
        }
        Ok(Self(slug))
    }

    /// Explicit slug when given, otherwise derived from `source`
    /// (a title or a name)
    pub fn explicit_or_derived(explicit: Option<&str>, source: &str) -> CmsResult<Self> {
        match explicit.map(str::trim).filter(|s| !s.is_empty()) {
            Some(slug) => Self::new(slug),
            None => Self::new(source),
        }
    }

    pub fn from_db(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_from_title() {
        let slug = Slug::explicit_or_derived(None, "The Future of SEO in 2024").unwrap();
        assert_eq!(slug.as_str(), "the-future-of-seo-in-2024");
    }

    #[test]
    fn test_explicit_wins_and_is_normalised() {
        let slug = Slug::explicit_or_derived(Some("My Custom Slug"), "ignored").unwrap();
        assert_eq!(slug.as_str(), "my-custom-slug");

        // Blank explicit slug falls back to the source
        let slug = Slug::explicit_or_derived(Some("   "), "Crème Brûlée").unwrap();
        assert_eq!(slug.as_str(), "creme-brulee");
    }

    #[test]
    fn test_empty_result_is_rejected() {
        assert!(matches!(
            Slug::explicit_or_derived(None, "!!!"),
            Err(CmsError::InvalidInput(_))
        ));
    }
}
