//! Tag Service

use std::sync::Arc;

use crate::domain::entity::tag::{Tag, TagDraft, TagPatch};
use crate::domain::repository::TagRepository;
use crate::domain::value_object::TagId;
use crate::error::{CmsError, CmsResult};

const NOT_FOUND: &str = "Tag not found";

pub struct TagService<R>
where
    R: TagRepository,
{
    repo: Arc<R>,
}

impl<R> TagService<R>
where
    R: TagRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> CmsResult<Vec<Tag>> {
        self.repo.list_tags().await
    }

    pub async fn create(&self, draft: TagDraft) -> CmsResult<Tag> {
        let tag = Tag::create(draft)?;
        self.repo.insert_tag(&tag).await?;

        tracing::info!(tag_id = %tag.id, slug = %tag.slug, "Tag created");
        Ok(tag)
    }

    pub async fn update(&self, id: &TagId, patch: TagPatch) -> CmsResult<Tag> {
        let mut tag = self
            .repo
            .find_tag(id)
            .await?
            .ok_or(CmsError::NotFound(NOT_FOUND))?;

        tag.apply(patch)?;

        if !self.repo.update_tag(&tag).await? {
            return Err(CmsError::NotFound(NOT_FOUND));
        }
        Ok(tag)
    }

    /// Removing a tag also unlinks it from its posts
    pub async fn delete(&self, id: &TagId) -> CmsResult<()> {
        if !self.repo.delete_tag(id).await? {
            return Err(CmsError::NotFound(NOT_FOUND));
        }
        tracing::info!(tag_id = %id, "Tag deleted");
        Ok(())
    }
}
