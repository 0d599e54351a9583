//! Tag Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{HexColor, Slug, TagId, color::DEFAULT_TAG_COLOR, text};
use crate::error::CmsResult;

pub const NAME_MAX_LENGTH: usize = 50;

#[derive(Debug, Clone)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub slug: Slug,
    pub color: HexColor,
    pub post_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct TagDraft {
    pub name: String,
    pub slug: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TagPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub color: Option<String>,
}

impl Tag {
    pub fn create(draft: TagDraft) -> CmsResult<Self> {
        let name = text::required("Name", &draft.name, NAME_MAX_LENGTH)?;
        let slug = Slug::explicit_or_derived(draft.slug.as_deref(), &name)?;
        let now = Utc::now();

        Ok(Self {
            id: TagId::new(),
            color: HexColor::or_default(draft.color.as_deref(), DEFAULT_TAG_COLOR)?,
            name,
            slug,
            post_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, patch: TagPatch) -> CmsResult<()> {
        if let Some(name) = patch.name {
            self.name = text::required("Name", &name, NAME_MAX_LENGTH)?;
        }
        if let Some(slug) = patch.slug {
            self.slug = Slug::new(&slug)?;
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
    fn test_create_defaults() {
        let tag = Tag::create(TagDraft {
            name: "Analytics".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(tag.slug.as_str(), "analytics");
        assert_eq!(tag.color.as_str(), "#6B7280");
    }

    #[test]
    fn test_bad_color_rejected_on_patch() {
        let mut tag = Tag::create(TagDraft {
            name: "AI".into(),
            ..Default::default()
        })
        .unwrap();
        assert!(tag
            .apply(TagPatch {
                color: Some("red".into()),
                ..Default::default()
            })
            .is_err());
    }
}
