//! Categories and tags

use super::PgCmsRepository;
use super::rows::{CategoryRow, TagRow};
use crate::domain::entity::{category::Category, tag::Tag};
use crate::domain::repository::{CategoryRepository, TagRepository};
use crate::domain::value_object::{CategoryId, TagId};
use crate::error::{CmsError, CmsResult};

const CATEGORY_SELECT: &str = r#"
    SELECT
        c.category_id,
        c.name,
        c.slug,
        c.description,
        c.color,
        COUNT(p.post_id) AS post_count,
        c.created_at,
        c.updated_at
    FROM categories c
    LEFT JOIN posts p ON p.category_id = c.category_id
"#;

const TAG_SELECT: &str = r#"
    SELECT
        t.tag_id,
        t.name,
        t.slug,
        t.color,
        COUNT(pt.post_id) AS post_count,
        t.created_at,
        t.updated_at
    FROM tags t
    LEFT JOIN post_tags pt ON pt.tag_id = t.tag_id
"#;

// ============================================================================
// Category Repository Implementation
// ============================================================================

impl CategoryRepository for PgCmsRepository {
    async fn list_categories(&self) -> CmsResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "{CATEGORY_SELECT} GROUP BY c.category_id ORDER BY c.name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn find_category(&self, id: &CategoryId) -> CmsResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "{CATEGORY_SELECT} WHERE c.category_id = $1 GROUP BY c.category_id"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn insert_category(&self, category: &Category) -> CmsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (
                category_id,
                name,
                slug,
                description,
                color,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(category.id.as_uuid())
        .bind(&category.name)
        .bind(category.slug.as_str())
        .bind(category.description.as_deref())
        .bind(category.color.as_str())
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_category_if_absent(&self, category: &Category) -> CmsResult<bool> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO categories (category_id, name, slug, description, color)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (slug) DO NOTHING
            "#,
        )
        .bind(category.id.as_uuid())
        .bind(&category.name)
        .bind(category.slug.as_str())
        .bind(category.description.as_deref())
        .bind(category.color.as_str())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted > 0)
    }

    async fn update_category(&self, category: &Category) -> CmsResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE categories SET
                name = $2,
                slug = $3,
                description = $4,
                color = $5,
                updated_at = $6
            WHERE category_id = $1
            "#,
        )
        .bind(category.id.as_uuid())
        .bind(&category.name)
        .bind(category.slug.as_str())
        .bind(category.description.as_deref())
        .bind(category.color.as_str())
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete_category(&self, id: &CategoryId) -> CmsResult<bool> {
        let deleted = sqlx::query("DELETE FROM categories WHERE category_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    CmsError::Conflict("Category still has posts".to_string())
                }
                _ => CmsError::Database(e),
            })?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Tag Repository Implementation
// ============================================================================

impl TagRepository for PgCmsRepository {
    async fn list_tags(&self) -> CmsResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, TagRow>(&format!(
            "{TAG_SELECT} GROUP BY t.tag_id ORDER BY t.name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TagRow::into_tag).collect())
    }

    async fn find_tag(&self, id: &TagId) -> CmsResult<Option<Tag>> {
        let row = sqlx::query_as::<_, TagRow>(&format!(
            "{TAG_SELECT} WHERE t.tag_id = $1 GROUP BY t.tag_id"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TagRow::into_tag))
    }

    async fn insert_tag(&self, tag: &Tag) -> CmsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tags (tag_id, name, slug, color, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(tag.id.as_uuid())
        .bind(&tag.name)
        .bind(tag.slug.as_str())
        .bind(tag.color.as_str())
        .bind(tag.created_at)
        .bind(tag.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_tag_if_absent(&self, tag: &Tag) -> CmsResult<bool> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO tags (tag_id, name, slug, color)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (slug) DO NOTHING
            "#,
        )
        .bind(tag.id.as_uuid())
        .bind(&tag.name)
        .bind(tag.slug.as_str())
        .bind(tag.color.as_str())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted > 0)
    }

    async fn update_tag(&self, tag: &Tag) -> CmsResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE tags SET
                name = $2,
                slug = $3,
                color = $4,
                updated_at = $5
            WHERE tag_id = $1
            "#,
        )
        .bind(tag.id.as_uuid())
        .bind(&tag.name)
        .bind(tag.slug.as_str())
        .bind(tag.color.as_str())
        .bind(tag.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete_tag(&self, id: &TagId) -> CmsResult<bool> {
        // post_tags rows go with it (ON DELETE CASCADE)
        let deleted = sqlx::query("DELETE FROM tags WHERE tag_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}
