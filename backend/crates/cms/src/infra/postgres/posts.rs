//! Posts and their tag links

use std::collections::HashMap;

use kernel::pagination::{Page, PageRequest};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::rows::{PostRow, PostTagRow};
use super::{PgCmsRepository, as_total, like_pattern, push_page};
use crate::domain::entity::post::{Post, PostFilter, PostView};
use crate::domain::repository::PostRepository;
use crate::domain::value_object::{PostId, TagId};
use crate::error::CmsResult;

const POST_SELECT: &str = r#"
    SELECT
        p.post_id,
        p.title,
        p.slug,
        p.excerpt,
        p.content,
        p.image,
        p.published,
        p.featured,
        p.author_id,
        p.category_id,
        p.seo_title,
        p.seo_description,
        p.seo_keywords,
        p.read_time,
        p.views,
        p.published_at,
        p.created_at,
        p.updated_at,
        a.display_name AS author_name,
        c.name AS category_name,
        c.slug AS category_slug,
        c.color AS category_color
    FROM posts p
    LEFT JOIN accounts a ON a.account_id = p.author_id
    LEFT JOIN categories c ON c.category_id = p.category_id
"#;

const POST_FROM: &str = r#"
    FROM posts p
    LEFT JOIN categories c ON c.category_id = p.category_id
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PostOrder {
    Newest,
    MostViewed,
}

impl PostOrder {
    fn clause(self) -> &'static str {
        match self {
            PostOrder::Newest => " ORDER BY p.created_at DESC",
            PostOrder::MostViewed => " ORDER BY p.views DESC, p.created_at DESC",
        }
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &PostFilter) {
    qb.push(" WHERE TRUE");

    if let Some(published) = filter.published {
        qb.push(" AND p.published = ").push_bind(published);
    }
    if let Some(category) = &filter.category_slug {
        qb.push(" AND c.slug = ").push_bind(category.clone());
    }
    if let Some(tag) = &filter.tag_slug {
        qb.push(
            " AND EXISTS (SELECT 1 FROM post_tags pt JOIN tags t ON t.tag_id = pt.tag_id \
             WHERE pt.post_id = p.post_id AND t.slug = ",
        )
        .push_bind(tag.clone())
        .push(")");
    }
    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = like_pattern(search);
        qb.push(" AND (p.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.excerpt ILIKE ")
            .push_bind(pattern.clone());
        if filter.search_content {
            qb.push(" OR p.content ILIKE ").push_bind(pattern);
        }
        qb.push(")");
    }
}

impl PgCmsRepository {
    /// Rows for one page, tags attached
    pub(super) async fn select_posts(
        &self,
        filter: &PostFilter,
        order: PostOrder,
        page: PageRequest,
    ) -> CmsResult<Vec<PostView>> {
        let mut qb = QueryBuilder::<Postgres>::new(POST_SELECT);
        push_filter(&mut qb, filter);
        qb.push(order.clause());
        push_page(&mut qb, page);

        let rows = qb.build_query_as::<PostRow>().fetch_all(&self.pool).await?;
        self.attach_tags(rows.into_iter().map(PostRow::into_view).collect())
            .await
    }

    async fn count_posts(&self, filter: &PostFilter) -> CmsResult<i64> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*)");
        qb.push(POST_FROM);
        push_filter(&mut qb, filter);

        Ok(qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?)
    }

    async fn attach_tags(&self, mut views: Vec<PostView>) -> CmsResult<Vec<PostView>> {
        if views.is_empty() {
            return Ok(views);
        }

        let ids: Vec<Uuid> = views.iter().map(|v| v.post.id.into_uuid()).collect();
        let rows = sqlx::query_as::<_, PostTagRow>(
            r#"
            SELECT pt.post_id, t.tag_id, t.name, t.slug, t.color
            FROM post_tags pt
            JOIN tags t ON t.tag_id = pt.tag_id
            WHERE pt.post_id = ANY($1)
            ORDER BY t.name ASC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_post: HashMap<Uuid, Vec<_>> = HashMap::new();
        for row in rows {
            by_post.entry(row.post_id).or_default().push(row.into_ref());
        }
        for view in &mut views {
            if let Some(tags) = by_post.remove(view.post.id.as_uuid()) {
                view.tags = tags;
            }
        }

        Ok(views)
    }

    async fn find_post_by_uuid(&self, id: Uuid) -> CmsResult<Option<PostView>> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{POST_SELECT} WHERE p.post_id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.attach_tags(vec![row.into_view()]).await?.pop()),
            None => Ok(None),
        }
    }
}

async fn link_tags(
    tx: &mut sqlx::PgConnection,
    post_id: &PostId,
    tag_ids: &[TagId],
) -> CmsResult<()> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    let ids: Vec<Uuid> = tag_ids.iter().map(|id| id.into_uuid()).collect();

    // Unknown tag ids fail the foreign key (409)
    sqlx::query(
        r#"
        INSERT INTO post_tags (post_id, tag_id)
        SELECT $1, tag_id FROM UNNEST($2::uuid[]) AS tag_id
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(post_id.as_uuid())
    .bind(&ids)
    .execute(tx)
    .await?;

    Ok(())
}

impl PostRepository for PgCmsRepository {
    async fn list_posts(&self, filter: &PostFilter, page: PageRequest) -> CmsResult<Page<PostView>> {
        let total = self.count_posts(filter).await?;
        let items = self.select_posts(filter, PostOrder::Newest, page).await?;

        Ok(Page {
            items,
            total: as_total(total),
        })
    }

    async fn find_post(&self, id: &PostId) -> CmsResult<Option<PostView>> {
        self.find_post_by_uuid(id.into_uuid()).await
    }

    async fn view_published_post(&self, slug: &str) -> CmsResult<Option<PostView>> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE posts SET views = views + 1
            WHERE slug = $1 AND published
            RETURNING post_id
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        match id {
            Some(id) => self.find_post_by_uuid(id).await,
            None => Ok(None),
        }
    }

    async fn insert_post(&self, post: &Post, tag_ids: &[TagId]) -> CmsResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id,
                title,
                slug,
                excerpt,
                content,
                image,
                published,
                featured,
                author_id,
                category_id,
                seo_title,
                seo_description,
                seo_keywords,
                read_time,
                views,
                published_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(&post.title)
        .bind(post.slug.as_str())
        .bind(post.excerpt.as_deref())
        .bind(&post.content)
        .bind(post.image.as_deref())
        .bind(post.published)
        .bind(post.featured)
        .bind(post.author_id.map(|id| id.into_uuid()))
        .bind(post.category_id.as_uuid())
        .bind(post.seo_title.as_deref())
        .bind(post.seo_description.as_deref())
        .bind(post.seo_keywords.as_deref())
        .bind(post.read_time.as_deref())
        .bind(post.views)
        .bind(post.published_at)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&mut *tx)
        .await?;

        link_tags(&mut *tx, &post.id, tag_ids).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn update_post(&self, post: &Post, tag_ids: Option<&[TagId]>) -> CmsResult<bool> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE posts SET
                title = $2,
                slug = $3,
                excerpt = $4,
                content = $5,
                image = $6,
                published = $7,
                featured = $8,
                category_id = $9,
                seo_title = $10,
                seo_description = $11,
                seo_keywords = $12,
                read_time = $13,
                published_at = $14,
                updated_at = $15
            WHERE post_id = $1
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(&post.title)
        .bind(post.slug.as_str())
        .bind(post.excerpt.as_deref())
        .bind(&post.content)
        .bind(post.image.as_deref())
        .bind(post.published)
        .bind(post.featured)
        .bind(post.category_id.as_uuid())
        .bind(post.seo_title.as_deref())
        .bind(post.seo_description.as_deref())
        .bind(post.seo_keywords.as_deref())
        .bind(post.read_time.as_deref())
        .bind(post.published_at)
        .bind(post.updated_at)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            return Ok(false);
        }

        if let Some(tag_ids) = tag_ids {
            sqlx::query("DELETE FROM post_tags WHERE post_id = $1")
                .bind(post.id.as_uuid())
                .execute(&mut *tx)
                .await?;
            link_tags(&mut *tx, &post.id, tag_ids).await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn delete_post(&self, id: &PostId) -> CmsResult<bool> {
        let deleted = sqlx::query("DELETE FROM posts WHERE post_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}
