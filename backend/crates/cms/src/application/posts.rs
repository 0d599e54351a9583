//! Post Service

use std::sync::Arc;

use chrono::Utc;
use kernel::pagination::{Page, PageRequest};

use crate::domain::entity::post::{Post, PostDraft, PostFilter, PostPatch, PostView};
use crate::domain::repository::PostRepository;
use crate::domain::value_object::{AccountId, PostId};
use crate::error::{CmsError, CmsResult};

const NOT_FOUND: &str = "Post not found";

/// `published` | `draft` | absent, as used by the admin post list
pub fn parse_status(status: Option<&str>) -> CmsResult<Option<bool>> {
    match status.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("published") => Ok(Some(true)),
        Some(s) if s.eq_ignore_ascii_case("draft") => Ok(Some(false)),
        Some(_) => Err(CmsError::invalid("Status must be 'published' or 'draft'")),
    }
}

pub struct PostService<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> PostService<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, filter: PostFilter, page: PageRequest) -> CmsResult<Page<PostView>> {
        self.repo.list_posts(&filter, page).await
    }

    /// Public listing: published posts only, whatever the filter says
    pub async fn list_published(
        &self,
        filter: PostFilter,
        page: PageRequest,
    ) -> CmsResult<Page<PostView>> {
        let filter = PostFilter {
            published: Some(true),
            search_content: true,
            ..filter
        };
        self.repo.list_posts(&filter, page).await
    }

    pub async fn get(&self, id: &PostId) -> CmsResult<PostView> {
        self.repo
            .find_post(id)
            .await?
            .ok_or(CmsError::NotFound(NOT_FOUND))
    }

    /// Public read: counts a view
    pub async fn read(&self, slug: &str) -> CmsResult<PostView> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(CmsError::invalid("Slug is required"));
        }
        self.repo
            .view_published_post(slug)
            .await?
            .ok_or(CmsError::NotFound(NOT_FOUND))
    }

    pub async fn create(&self, mut draft: PostDraft, author_id: AccountId) -> CmsResult<PostView> {
        let tag_ids = std::mem::take(&mut draft.tag_ids);
        let post = Post::create(draft, author_id, Utc::now())?;

        self.repo.insert_post(&post, &tag_ids).await?;

        tracing::info!(
            post_id = %post.id,
            slug = %post.slug,
            published = post.published,
            "Post created"
        );

        self.get(&post.id).await
    }

    pub async fn update(&self, id: &PostId, mut patch: PostPatch) -> CmsResult<PostView> {
        let mut post = self.get(id).await?.post;
        let tag_ids = patch.tag_ids.take();

        post.apply(patch, Utc::now())?;

        if !self.repo.update_post(&post, tag_ids.as_deref()).await? {
            return Err(CmsError::NotFound(NOT_FOUND));
        }

        tracing::info!(post_id = %post.id, published = post.published, "Post updated");

        self.get(id).await
    }

    pub async fn delete(&self, id: &PostId) -> CmsResult<()> {
        if !self.repo.delete_post(id).await? {
            return Err(CmsError::NotFound(NOT_FOUND));
        }
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status(None).unwrap(), None);
        assert_eq!(parse_status(Some("")).unwrap(), None);
        assert_eq!(parse_status(Some("published")).unwrap(), Some(true));
        assert_eq!(parse_status(Some("Draft")).unwrap(), Some(false));
        assert!(parse_status(Some("archived")).is_err());
    }
}
