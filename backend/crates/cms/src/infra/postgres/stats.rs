//! Dashboard and blog aggregates

use kernel::pagination::PageRequest;

use super::PgCmsRepository;
use super::posts::PostOrder;
use crate::domain::entity::post::PostFilter;
use crate::domain::entity::stats::{BlogStats, Dashboard, MemberCounts, PostCounts};
use crate::domain::repository::{CategoryRepository, StatsRepository};
use crate::error::CmsResult;

/// Rows shown in each "recent" and "popular" list
const SHORT_LIST: u32 = 5;

#[derive(sqlx::FromRow)]
struct DashboardCounts {
    posts: i64,
    published_posts: i64,
    members: i64,
    active_members: i64,
    published_videos: i64,
    active_products: i64,
}

#[derive(sqlx::FromRow)]
struct BlogCounts {
    posts: i64,
    published_posts: i64,
    total_views: i64,
}

fn short_list() -> PageRequest {
    PageRequest::new(Some(1), Some(SHORT_LIST))
}

fn published_only() -> PostFilter {
    PostFilter {
        published: Some(true),
        ..Default::default()
    }
}

impl StatsRepository for PgCmsRepository {
    async fn dashboard(&self) -> CmsResult<Dashboard> {
        let counts = sqlx::query_as::<_, DashboardCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM posts) AS posts,
                (SELECT COUNT(*) FROM posts WHERE published) AS published_posts,
                (SELECT COUNT(*) FROM members) AS members,
                (SELECT COUNT(*) FROM members WHERE status = 'ACTIVE') AS active_members,
                (SELECT COUNT(*) FROM videos WHERE published) AS published_videos,
                (SELECT COUNT(*) FROM products WHERE active) AS active_products
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let recent_contacts = self.recent_unread_contacts(i64::from(SHORT_LIST)).await?;
        let recent_posts = self
            .select_posts(&PostFilter::default(), PostOrder::Newest, short_list())
            .await?;
        let popular_posts = self
            .select_posts(&published_only(), PostOrder::MostViewed, short_list())
            .await?;

        Ok(Dashboard {
            posts: PostCounts {
                total: counts.posts,
                published: counts.published_posts,
            },
            members: MemberCounts {
                total: counts.members,
                active: counts.active_members,
            },
            videos: counts.published_videos,
            products: counts.active_products,
            recent_contacts,
            recent_posts,
            popular_posts,
        })
    }

    async fn blog_stats(&self) -> CmsResult<BlogStats> {
        let counts = sqlx::query_as::<_, BlogCounts>(
            r#"
            SELECT
                COUNT(*) AS posts,
                COUNT(*) FILTER (WHERE published) AS published_posts,
                COALESCE(SUM(views), 0)::BIGINT AS total_views
            FROM posts
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let recent_posts = self
            .select_posts(&published_only(), PostOrder::Newest, short_list())
            .await?;
        let popular_posts = self
            .select_posts(&published_only(), PostOrder::MostViewed, short_list())
            .await?;
        let categories = self.list_categories().await?;

        Ok(BlogStats {
            posts: PostCounts {
                total: counts.posts,
                published: counts.published_posts,
            },
            total_views: counts.total_views,
            recent_posts,
            popular_posts,
            categories,
        })
    }

    async fn ping(&self) -> CmsResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
