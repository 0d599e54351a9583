//! Product Service

use std::sync::Arc;

use kernel::pagination::{Page, PageRequest};

use crate::domain::entity::product::{Product, ProductDraft, ProductFilter, ProductPatch};
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::ProductId;
use crate::error::{CmsError, CmsResult};

const NOT_FOUND: &str = "Product not found";

pub struct ProductService<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> ProductService<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, filter: ProductFilter, page: PageRequest) -> CmsResult<Page<Product>> {
        self.repo.list_products(&filter, Some(page)).await
    }

    /// Storefront listing: active products only, unpaginated
    pub async fn list_active(&self, filter: ProductFilter) -> CmsResult<Vec<Product>> {
        let filter = ProductFilter {
            active_only: true,
            ..filter
        };
        Ok(self.repo.list_products(&filter, None).await?.items)
    }

    pub async fn get(&self, id: &ProductId) -> CmsResult<Product> {
        self.repo
            .find_product(id)
            .await?
            .ok_or(CmsError::NotFound(NOT_FOUND))
    }

    pub async fn create(&self, draft: ProductDraft) -> CmsResult<Product> {
        let product = Product::create(draft)?;
        self.repo.insert_product(&product).await?;

        tracing::info!(product_id = %product.id, slug = %product.slug, "Product created");
        Ok(product)
    }

    pub async fn update(&self, id: &ProductId, patch: ProductPatch) -> CmsResult<Product> {
        let mut product = self.get(id).await?;
        product.apply(patch)?;

        if !self.repo.update_product(&product).await? {
            return Err(CmsError::NotFound(NOT_FOUND));
        }
        Ok(product)
    }

    pub async fn delete(&self, id: &ProductId) -> CmsResult<()> {
        if !self.repo.delete_product(id).await? {
            return Err(CmsError::NotFound(NOT_FOUND));
        }
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }
}
