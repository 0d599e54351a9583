//! Products and videos

use kernel::pagination::{Page, PageRequest};
use sqlx::{Postgres, QueryBuilder};

use super::rows::{ProductRow, VideoRow};
use super::{PgCmsRepository, as_total, like_pattern, push_page};
use crate::domain::entity::{
    product::{Product, ProductFilter},
    video::{Video, VideoFilter},
};
use crate::domain::repository::{ProductRepository, VideoRepository};
use crate::domain::value_object::{ProductId, VideoId};
use crate::error::CmsResult;

const PRODUCT_SELECT: &str = r#"
    SELECT
        product_id,
        name,
        slug,
        description,
        long_description,
        price,
        image,
        category,
        product_type,
        download_url,
        featured,
        active,
        created_at,
        updated_at
    FROM products
"#;

const VIDEO_SELECT: &str = r#"
    SELECT
        video_id,
        title,
        description,
        youtube_id,
        thumbnail,
        duration,
        published,
        featured,
        created_at,
        updated_at
    FROM videos
"#;

fn push_product_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    qb.push(" WHERE TRUE");

    if filter.active_only {
        qb.push(" AND active");
    }
    if filter.featured_only {
        qb.push(" AND featured");
    }
    if let Some(category) = &filter.category {
        qb.push(" AND category = ")
            .push_bind(category.as_str().to_string());
    }
    if let Some(product_type) = &filter.product_type {
        qb.push(" AND product_type = ")
            .push_bind(product_type.as_str().to_string());
    }
    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = like_pattern(search);
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

fn push_video_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: VideoFilter) {
    qb.push(" WHERE TRUE");
    if filter.published_only {
        qb.push(" AND published");
    }
    if filter.featured_only {
        qb.push(" AND featured");
    }
}

// ============================================================================
// Product Repository Implementation
// ============================================================================

impl ProductRepository for PgCmsRepository {
    async fn list_products(
        &self,
        filter: &ProductFilter,
        page: Option<PageRequest>,
    ) -> CmsResult<Page<Product>> {
        let mut qb = QueryBuilder::<Postgres>::new(PRODUCT_SELECT);
        push_product_filter(&mut qb, filter);
        qb.push(" ORDER BY featured DESC, created_at DESC");

        let Some(page) = page else {
            let items: Vec<Product> = qb
                .build_query_as::<ProductRow>()
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .map(ProductRow::into_product)
                .collect();
            let total = items.len() as u64;
            return Ok(Page { items, total });
        };

        push_page(&mut qb, page);
        let items = qb
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(ProductRow::into_product)
            .collect();

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_product_filter(&mut count, filter);
        let total = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        Ok(Page {
            items,
            total: as_total(total),
        })
    }

    async fn find_product(&self, id: &ProductId) -> CmsResult<Option<Product>> {
        let row =
            sqlx::query_as::<_, ProductRow>(&format!("{PRODUCT_SELECT} WHERE product_id = $1"))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn insert_product(&self, product: &Product) -> CmsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (
                product_id,
                name,
                slug,
                description,
                long_description,
                price,
                image,
                category,
                product_type,
                download_url,
                featured,
                active,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(product.slug.as_str())
        .bind(product.description.as_deref())
        .bind(product.long_description.as_deref())
        .bind(product.price)
        .bind(product.image.as_deref())
        .bind(product.category.as_str())
        .bind(product.product_type.as_str())
        .bind(product.download_url.as_deref())
        .bind(product.featured)
        .bind(product.active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_product(&self, product: &Product) -> CmsResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE products SET
                name = $2,
                slug = $3,
                description = $4,
                long_description = $5,
                price = $6,
                image = $7,
                category = $8,
                product_type = $9,
                download_url = $10,
                featured = $11,
                active = $12,
                updated_at = $13
            WHERE product_id = $1
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(product.slug.as_str())
        .bind(product.description.as_deref())
        .bind(product.long_description.as_deref())
        .bind(product.price)
        .bind(product.image.as_deref())
        .bind(product.category.as_str())
        .bind(product.product_type.as_str())
        .bind(product.download_url.as_deref())
        .bind(product.featured)
        .bind(product.active)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete_product(&self, id: &ProductId) -> CmsResult<bool> {
        let deleted = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Video Repository Implementation
// ============================================================================

impl VideoRepository for PgCmsRepository {
    async fn list_videos(&self, filter: VideoFilter, page: PageRequest) -> CmsResult<Page<Video>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM videos");
        push_video_filter(&mut count, filter);
        let total = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::<Postgres>::new(VIDEO_SELECT);
        push_video_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC");
        push_page(&mut qb, page);

        let items = qb
            .build_query_as::<VideoRow>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(VideoRow::into_video)
            .collect();

        Ok(Page {
            items,
            total: as_total(total),
        })
    }

    async fn find_video(&self, id: &VideoId) -> CmsResult<Option<Video>> {
        let row = sqlx::query_as::<_, VideoRow>(&format!("{VIDEO_SELECT} WHERE video_id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(VideoRow::into_video))
    }

    async fn insert_video(&self, video: &Video) -> CmsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO videos (
                video_id,
                title,
                description,
                youtube_id,
                thumbnail,
                duration,
                published,
                featured,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(video.id.as_uuid())
        .bind(&video.title)
        .bind(video.description.as_deref())
        .bind(&video.youtube_id)
        .bind(video.thumbnail.as_deref())
        .bind(video.duration.as_deref())
        .bind(video.published)
        .bind(video.featured)
        .bind(video.created_at)
        .bind(video.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_video(&self, video: &Video) -> CmsResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE videos SET
                title = $2,
                description = $3,
                youtube_id = $4,
                thumbnail = $5,
                duration = $6,
                published = $7,
                featured = $8,
                updated_at = $9
            WHERE video_id = $1
            "#,
        )
        .bind(video.id.as_uuid())
        .bind(&video.title)
        .bind(video.description.as_deref())
        .bind(&video.youtube_id)
        .bind(video.thumbnail.as_deref())
        .bind(video.duration.as_deref())
        .bind(video.published)
        .bind(video.featured)
        .bind(video.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete_video(&self, id: &VideoId) -> CmsResult<bool> {
        let deleted = sqlx::query("DELETE FROM videos WHERE video_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}
