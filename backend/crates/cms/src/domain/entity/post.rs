//! Post Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{AccountId, CategoryId, PostId, Slug, TagId, text};
use crate::error::{CmsError, CmsResult};

pub const TITLE_MAX_LENGTH: usize = 200;
pub const EXCERPT_MAX_LENGTH: usize = 500;
pub const CONTENT_MAX_LENGTH: usize = 200_000;
pub const URL_MAX_LENGTH: usize = 2048;
pub const SEO_MAX_LENGTH: usize = 500;
pub const READ_TIME_MAX_LENGTH: usize = 50;

#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub slug: Slug,
    pub excerpt: Option<String>,
    pub content: String,
    pub image: Option<String>,
    pub published: bool,
    pub featured: bool,
    /// `None` once the author account is gone
    pub author_id: Option<AccountId>,
    pub category_id: CategoryId,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    /// Free text such as "8 min read"
    pub read_time: Option<String>,
    pub views: i64,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category fields embedded in post responses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub color: String,
}

/// Tag fields embedded in post responses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub id: TagId,
    pub name: String,
    pub slug: String,
    pub color: String,
}

/// A post with its author name, category and tags resolved
#[derive(Debug, Clone)]
pub struct PostView {
    pub post: Post,
    pub author_name: Option<String>,
    pub category: Option<CategoryRef>,
    pub tags: Vec<TagRef>,
}

#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: String,
    pub image: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub category_id: Option<CategoryId>,
    pub tag_ids: Vec<TagId>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    pub read_time: Option<String>,
}

/// Present fields replace the stored ones; blank optional text clears.
/// `tag_ids`, when present, replaces the whole tag set.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub category_id: Option<CategoryId>,
    pub tag_ids: Option<Vec<TagId>>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    pub read_time: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Which posts a listing returns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub published: Option<bool>,
    pub category_slug: Option<String>,
    pub tag_slug: Option<String>,
    pub search: Option<String>,
    /// Also match the body, not only title and excerpt
    pub search_content: bool,
}

impl Post {
    /// Validate a draft. Tags are not part of the post row; callers take
    /// `draft.tag_ids` before handing the draft over.
    pub fn create(draft: PostDraft, author_id: AccountId, now: DateTime<Utc>) -> CmsResult<Self> {
        let title = text::required("Title", &draft.title, TITLE_MAX_LENGTH)?;
        let slug = Slug::explicit_or_derived(draft.slug.as_deref(), &title)?;
        let content = text::required("Content", &draft.content, CONTENT_MAX_LENGTH)?;
        let category_id = draft
            .category_id
            .ok_or_else(|| CmsError::invalid("Category is required"))?;
        let excerpt = text::optional("Excerpt", draft.excerpt.as_deref(), EXCERPT_MAX_LENGTH)?;

        let seo_title = text::optional("SEO title", draft.seo_title.as_deref(), SEO_MAX_LENGTH)?
            .or_else(|| Some(title.clone()));
        let seo_description = text::optional(
            "SEO description",
            draft.seo_description.as_deref(),
            SEO_MAX_LENGTH,
        )?
        .or_else(|| excerpt.clone());

        Ok(Self {
            id: PostId::new(),
            image: text::optional("Image", draft.image.as_deref(), URL_MAX_LENGTH)?,
            seo_keywords: text::optional(
                "SEO keywords",
                draft.seo_keywords.as_deref(),
                SEO_MAX_LENGTH,
            )?,
            read_time: text::optional(
                "Read time",
                draft.read_time.as_deref(),
                READ_TIME_MAX_LENGTH,
            )?,
            published: draft.published,
            featured: draft.featured,
            published_at: draft.published.then_some(now),
            author_id: Some(author_id),
            views: 0,
            created_at: now,
            updated_at: now,
            title,
            slug,
            excerpt,
            content,
            category_id,
            seo_title,
            seo_description,
        })
    }

    /// Merge a patch. Publishing a post that was not published stamps
    /// `published_at` with `now` unless the patch supplies a date.
    pub fn apply(&mut self, patch: PostPatch, now: DateTime<Utc>) -> CmsResult<()> {
        if let Some(title) = patch.title {
            self.title = text::required("Title", &title, TITLE_MAX_LENGTH)?;
        }
        if let Some(slug) = patch.slug {
            self.slug = Slug::new(&slug)?;
        }
        if let Some(excerpt) = patch.excerpt {
            self.excerpt = text::optional("Excerpt", Some(&excerpt), EXCERPT_MAX_LENGTH)?;
        }
        if let Some(content) = patch.content {
            self.content = text::required("Content", &content, CONTENT_MAX_LENGTH)?;
        }
        if let Some(image) = patch.image {
            self.image = text::optional("Image", Some(&image), URL_MAX_LENGTH)?;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(seo_title) = patch.seo_title {
            self.seo_title = text::optional("SEO title", Some(&seo_title), SEO_MAX_LENGTH)?
                .or_else(|| Some(self.title.clone()));
        }
        if let Some(seo_description) = patch.seo_description {
            self.seo_description =
                text::optional("SEO description", Some(&seo_description), SEO_MAX_LENGTH)?
                    .or_else(|| self.excerpt.clone());
        }
        if let Some(seo_keywords) = patch.seo_keywords {
            self.seo_keywords = text::optional("SEO keywords", Some(&seo_keywords), SEO_MAX_LENGTH)?;
        }
        if let Some(read_time) = patch.read_time {
            self.read_time = text::optional("Read time", Some(&read_time), READ_TIME_MAX_LENGTH)?;
        }

        match (patch.published, patch.published_at) {
            (Some(true), Some(at)) => {
                self.published = true;
                self.published_at = Some(at);
            }
            (Some(true), None) => {
                if !self.published {
                    self.published_at = Some(now);
                }
                self.published = true;
            }
            // Unpublishing keeps the historical date
            (Some(false), _) => self.published = false,
            (None, Some(at)) if self.published => self.published_at = Some(at),
            (None, _) => {}
        }

        self.updated_at = now;
        Ok(())
    }
}
