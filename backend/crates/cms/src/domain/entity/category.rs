//! Category Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    CategoryId, HexColor, Slug, color::DEFAULT_CATEGORY_COLOR, text,
};
use crate::error::CmsResult;

pub const NAME_MAX_LENGTH: usize = 100;
pub const DESCRIPTION_MAX_LENGTH: usize = 500;

#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: Slug,
    pub description: Option<String>,
    pub color: HexColor,
    /// Posts filed under this category; derived on read
    pub post_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// Present fields replace the stored ones. A blank description clears it.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl Category {
    pub fn create(draft: CategoryDraft) -> CmsResult<Self> {
        let name = text::required("Name", &draft.name, NAME_MAX_LENGTH)?;
        let slug = Slug::explicit_or_derived(draft.slug.as_deref(), &name)?;
        let now = Utc::now();

        Ok(Self {
            id: CategoryId::new(),
            description: text::optional(
                "Description",
                draft.description.as_deref(),
                DESCRIPTION_MAX_LENGTH,
            )?,
            color: HexColor::or_default(draft.color.as_deref(), DEFAULT_CATEGORY_COLOR)?,
            name,
            slug,
            post_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, patch: CategoryPatch) -> CmsResult<()> {
        if let Some(name) = patch.name {
            self.name = text::required("Name", &name, NAME_MAX_LENGTH)?;
        }
        if let Some(slug) = patch.slug {
            self.slug = Slug::new(&slug)?;
        }
        if let Some(description) = patch.description {
            self.description =
                text::optional("Description", Some(&description), DESCRIPTION_MAX_LENGTH)?;
        }
        if let Some(color) = patch.color {
            self.color = HexColor::new(&color)?;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_derives_slug_and_default_color() {
        let category = Category::create(CategoryDraft {
            name: "AI & Technology".into(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(category.slug.as_str(), "ai-technology");
        assert_eq!(category.color.as_str(), "#3B82F6");
        assert_eq!(category.post_count, 0);
    }

    #[test]
    fn test_create_requires_name() {
        let result = Category::create(CategoryDraft {
            name: "  ".into(),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_patch_keeps_absent_fields() {
        let mut category = Category::create(CategoryDraft {
            name: "SEO".into(),
            description: Some("Search".into()),
            ..Default::default()
        })
        .unwrap();

        category
            .apply(CategoryPatch {
                name: Some("Search Engines".into()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(category.name, "Search Engines");
        // Renaming does not move the URL
        assert_eq!(category.slug.as_str(), "seo");
        assert_eq!(category.description.as_deref(), Some("Search"));

        category
            .apply(CategoryPatch {
                description: Some(String::new()),
                ..Default::default()
            })
            .unwrap();
        assert!(category.description.is_none());
    }
}
