//! Category Service

use std::sync::Arc;

use crate::domain::entity::category::{Category, CategoryDraft, CategoryPatch};
use crate::domain::repository::CategoryRepository;
use crate::domain::value_object::CategoryId;
use crate::error::{CmsError, CmsResult};

const NOT_FOUND: &str = "Category not found";

pub struct CategoryService<R>
where
    R: CategoryRepository,
{
    repo: Arc<R>,
}

impl<R> CategoryService<R>
where
    R: CategoryRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> CmsResult<Vec<Category>> {
        self.repo.list_categories().await
    }

    pub async fn create(&self, draft: CategoryDraft) -> CmsResult<Category> {
        let category = Category::create(draft)?;
        self.repo.insert_category(&category).await?;

        tracing::info!(category_id = %category.id, slug = %category.slug, "Category created");
        Ok(category)
    }

    pub async fn update(&self, id: &CategoryId, patch: CategoryPatch) -> CmsResult<Category> {
        let mut category = self
            .repo
            .find_category(id)
            .await?
            .ok_or(CmsError::NotFound(NOT_FOUND))?;

        category.apply(patch)?;

        if !self.repo.update_category(&category).await? {
            return Err(CmsError::NotFound(NOT_FOUND));
        }
        Ok(category)
    }

    /// Categories that still have posts cannot be deleted (409)
    pub async fn delete(&self, id: &CategoryId) -> CmsResult<()> {
        if !self.repo.delete_category(id).await? {
            return Err(CmsError::NotFound(NOT_FOUND));
        }
        tracing::info!(category_id = %id, "Category deleted");
        Ok(())
    }
}
