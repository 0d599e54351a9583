//! API DTOs (Data Transfer Objects)
//!
//! Response bodies are camelCase. Request bodies use `Option` for every
//! field so that a missing one reaches validation and comes back as a 400
//! naming the field, instead of a deserialization error.

use chrono::{DateTime, Utc};
use kernel::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::application::HealthReport;
use crate::domain::entity::{
    category::{Category, CategoryDraft, CategoryPatch},
    contact::{Contact, ContactDraft},
    member::{Member, MemberDraft, MemberPatch},
    post::{CategoryRef, PostDraft, PostPatch, PostView, TagRef},
    product::{Product, ProductDraft, ProductPatch},
    stats::{BlogStats, Dashboard},
    tag::{Tag, TagDraft, TagPatch},
    video::{Video, VideoDraft, VideoPatch},
};
use crate::domain::value_object::{
    AccountId, CategoryId, ContactMessageId, MemberId, PostId, ProductId, TagId, VideoId,
};

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub const OK: Self = Self { success: true };
}

// ============================================================================
// Categories & Tags
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub color: String,
    pub post_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug.to_string(),
            description: category.description,
            color: category.color.to_string(),
            post_count: category.post_count,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl CategoryRequest {
    pub fn into_draft(self) -> CategoryDraft {
        CategoryDraft {
            name: self.name.unwrap_or_default(),
            slug: self.slug,
            description: self.description,
            color: self.color,
        }
    }

    pub fn into_patch(self) -> CategoryPatch {
        CategoryPatch {
            name: self.name,
            slug: self.slug,
            description: self.description,
            color: self.color,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDto {
    pub id: TagId,
    pub name: String,
    pub slug: String,
    pub color: String,
    pub post_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Tag> for TagDto {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            slug: tag.slug.to_string(),
            color: tag.color.to_string(),
            post_count: tag.post_count,
            created_at: tag.created_at,
            updated_at: tag.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub color: Option<String>,
}

impl TagRequest {
    pub fn into_draft(self) -> TagDraft {
        TagDraft {
            name: self.name.unwrap_or_default(),
            slug: self.slug,
            color: self.color,
        }
    }

    pub fn into_patch(self) -> TagPatch {
        TagPatch {
            name: self.name,
            slug: self.slug,
            color: self.color,
        }
    }
}

// ============================================================================
// Posts
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRefDto {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub color: String,
}

impl From<CategoryRef> for CategoryRefDto {
    fn from(category: CategoryRef) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            color: category.color,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TagRefDto {
    pub id: TagId,
    pub name: String,
    pub slug: String,
    pub color: String,
}

impl From<TagRef> for TagRefDto {
    fn from(tag: TagRef) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            slug: tag.slug,
            color: tag.color,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorDto {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub image: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub author_id: Option<AccountId>,
    pub author: Option<AuthorDto>,
    pub category_id: CategoryId,
    pub category: Option<CategoryRefDto>,
    pub tags: Vec<TagRefDto>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    pub read_time: Option<String>,
    pub views: i64,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostView> for PostDto {
    fn from(view: PostView) -> Self {
        let post = view.post;
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug.to_string(),
            excerpt: post.excerpt,
            content: post.content,
            image: post.image,
            published: post.published,
            featured: post.featured,
            author_id: post.author_id,
            author: view.author_name.map(|name| AuthorDto { name }),
            category_id: post.category_id,
            category: view.category.map(CategoryRefDto::from),
            tags: view.tags.into_iter().map(TagRefDto::from).collect(),
            seo_title: post.seo_title,
            seo_description: post.seo_description,
            seo_keywords: post.seo_keywords,
            read_time: post.read_time,
            views: post.views,
            published_at: post.published_at,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostDto>,
    pub pagination: Pagination,
}

/// `tags` holds tag ids
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub category_id: Option<CategoryId>,
    pub tags: Option<Vec<TagId>>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    pub read_time: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl PostRequest {
    pub fn into_draft(self) -> PostDraft {
        PostDraft {
            title: self.title.unwrap_or_default(),
            slug: self.slug,
            excerpt: self.excerpt,
            content: self.content.unwrap_or_default(),
            image: self.image,
            published: self.published.unwrap_or(false),
            featured: self.featured.unwrap_or(false),
            category_id: self.category_id,
            tag_ids: self.tags.unwrap_or_default(),
            seo_title: self.seo_title,
            seo_description: self.seo_description,
            seo_keywords: self.seo_keywords,
            read_time: self.read_time,
        }
    }

    pub fn into_patch(self) -> PostPatch {
        PostPatch {
            title: self.title,
            slug: self.slug,
            excerpt: self.excerpt,
            content: self.content,
            image: self.image,
            published: self.published,
            featured: self.featured,
            category_id: self.category_id,
            tag_ids: self.tags,
            seo_title: self.seo_title,
            seo_description: self.seo_description,
            seo_keywords: self.seo_keywords,
            read_time: self.read_time,
            published_at: self.published_at,
        }
    }
}

/// Admin list: `status=published|draft`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminPostQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Public list: `category` and `tag` are slugs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogPostQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

// ============================================================================
// Members
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub plan: String,
    pub status: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Member> for MemberDto {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            name: member.name,
            email: member.email,
            plan: member.plan.to_string(),
            status: member.status.to_string(),
            expires_at: member.expires_at,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberListResponse {
    pub members: Vec<MemberDto>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub plan: Option<String>,
    pub status: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl MemberRequest {
    pub fn into_draft(self) -> MemberDraft {
        MemberDraft {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            plan: self.plan.unwrap_or_default(),
            status: self.status,
            expires_at: self.expires_at,
        }
    }

    pub fn into_patch(self) -> MemberPatch {
        MemberPatch {
            name: self.name,
            email: self.email,
            plan: self.plan,
            status: self.status,
            expires_at: self.expires_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub plan: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

// ============================================================================
// Products
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
    pub category: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub download_url: Option<String>,
    pub featured: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            slug: product.slug.to_string(),
            description: product.description,
            long_description: product.long_description,
            price: product.price,
            image: product.image,
            category: product.category.to_string(),
            product_type: product.product_type.to_string(),
            download_url: product.download_url,
            featured: product.featured,
            active: product.active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductDto>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub download_url: Option<String>,
    pub featured: Option<bool>,
    pub active: Option<bool>,
}

impl ProductRequest {
    pub fn into_draft(self) -> ProductDraft {
        let defaults = ProductDraft::default();
        ProductDraft {
            name: self.name.unwrap_or_default(),
            slug: self.slug,
            description: self.description,
            long_description: self.long_description,
            price: self.price,
            image: self.image,
            category: self.category.unwrap_or_default(),
            product_type: self.product_type.unwrap_or_default(),
            download_url: self.download_url,
            featured: self.featured.unwrap_or(defaults.featured),
            active: self.active.unwrap_or(defaults.active),
        }
    }

    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: self.name,
            slug: self.slug,
            description: self.description,
            long_description: self.long_description,
            price: self.price,
            image: self.image,
            category: self.category,
            product_type: self.product_type,
            download_url: self.download_url,
            featured: self.featured,
            active: self.active,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminProductQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub featured: Option<bool>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
}

// ============================================================================
// Videos
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDto {
    pub id: VideoId,
    pub title: String,
    pub description: Option<String>,
    pub youtube_id: String,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Video> for VideoDto {
    fn from(video: Video) -> Self {
        Self {
            id: video.id,
            title: video.title,
            description: video.description,
            youtube_id: video.youtube_id,
            thumbnail: video.thumbnail,
            duration: video.duration,
            published: video.published,
            featured: video.featured,
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoListResponse {
    pub videos: Vec<VideoDto>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub youtube_id: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
}

impl VideoRequest {
    pub fn into_draft(self) -> VideoDraft {
        let defaults = VideoDraft::default();
        VideoDraft {
            title: self.title.unwrap_or_default(),
            description: self.description,
            youtube_id: self.youtube_id.unwrap_or_default(),
            thumbnail: self.thumbnail,
            duration: self.duration,
            published: self.published.unwrap_or(defaults.published),
            featured: self.featured.unwrap_or(defaults.featured),
        }
    }

    pub fn into_patch(self) -> VideoPatch {
        VideoPatch {
            title: self.title,
            description: self.description,
            youtube_id: self.youtube_id,
            thumbnail: self.thumbnail,
            duration: self.duration,
            published: self.published,
            featured: self.featured,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub featured: Option<bool>,
}

// ============================================================================
// Contacts
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDto {
    pub id: ContactMessageId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Contact> for ContactDto {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            email: contact.email,
            subject: contact.subject,
            message: contact.message,
            read: contact.read,
            created_at: contact.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl From<ContactRequest> for ContactDraft {
    fn from(req: ContactRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            subject: req.subject,
            message: req.message,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactSubmittedResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactQuery {
    #[serde(default)]
    pub unread: bool,
}

// ============================================================================
// Dashboard & blog stats
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PostCountsDto {
    pub total: i64,
    pub published: i64,
    pub draft: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberCountsDto {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentCountsDto {
    pub videos: i64,
    pub products: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentActivityDto {
    pub contacts: Vec<ContactDto>,
    pub posts: Vec<PostDto>,
    pub popular: Vec<PostDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub posts: PostCountsDto,
    pub members: MemberCountsDto,
    pub content: ContentCountsDto,
    pub recent: RecentActivityDto,
}

impl From<Dashboard> for DashboardResponse {
    fn from(dashboard: Dashboard) -> Self {
        Self {
            posts: PostCountsDto {
                total: dashboard.posts.total,
                published: dashboard.posts.published,
                draft: dashboard.posts.draft(),
            },
            members: MemberCountsDto {
                total: dashboard.members.total,
                active: dashboard.members.active,
                inactive: dashboard.members.inactive(),
            },
            content: ContentCountsDto {
                videos: dashboard.videos,
                products: dashboard.products,
            },
            recent: RecentActivityDto {
                contacts: dashboard.recent_contacts.into_iter().map(Into::into).collect(),
                posts: dashboard.recent_posts.into_iter().map(Into::into).collect(),
                popular: dashboard.popular_posts.into_iter().map(Into::into).collect(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogStatsResponse {
    pub total_posts: i64,
    pub published_posts: i64,
    pub draft_posts: i64,
    pub total_views: i64,
    pub recent_posts: Vec<PostDto>,
    pub popular_posts: Vec<PostDto>,
    pub categories: Vec<CategoryDto>,
    pub average_views: i64,
    pub publish_rate: i64,
}

impl From<BlogStats> for BlogStatsResponse {
    fn from(stats: BlogStats) -> Self {
        Self {
            total_posts: stats.posts.total,
            published_posts: stats.posts.published,
            draft_posts: stats.posts.draft(),
            total_views: stats.total_views,
            average_views: stats.average_views(),
            publish_rate: stats.publish_rate(),
            recent_posts: stats.recent_posts.into_iter().map(Into::into).collect(),
            popular_posts: stats.popular_posts.into_iter().map(Into::into).collect(),
            categories: stats.categories.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatusDto {
    pub status: &'static str,
    #[serde(rename = "latencyMs", skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthServicesDto {
    pub database: ServiceStatusDto,
    pub api: ServiceStatusDto,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub services: HealthServicesDto,
}

fn status_word(ok: bool) -> &'static str {
    if ok { "healthy" } else { "unhealthy" }
}

impl From<HealthReport> for HealthResponse {
    fn from(report: HealthReport) -> Self {
        Self {
            status: status_word(report.is_healthy()),
            timestamp: report.checked_at,
            services: HealthServicesDto {
                database: ServiceStatusDto {
                    status: status_word(report.database_ok),
                    latency_ms: Some(u64::try_from(report.latency_ms).unwrap_or(u64::MAX)),
                    // Store errors can name hosts and users
                    error: report.database_error.filter(|_| cfg!(debug_assertions)),
                },
                api: ServiceStatusDto {
                    status: status_word(true),
                    latency_ms: None,
                    error: None,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::stats::{MemberCounts, PostCounts};

    #[test]
    fn test_post_request_reads_camel_case() {
        let req: PostRequest = serde_json::from_str(
            r#"{
                "title": "Hello",
                "categoryId": "6f1c2a8e-1d1b-4d2a-9a59-0d3f1b2c3d4e",
                "tags": ["0b8f3c1e-5a6d-4e7f-8a9b-1c2d3e4f5a6b"],
                "seoTitle": "SEO"
            }"#,
        )
        .unwrap();

        assert_eq!(req.title.as_deref(), Some("Hello"));
        assert!(req.category_id.is_some());
        assert_eq!(req.seo_title.as_deref(), Some("SEO"));

        let draft = req.into_draft();
        assert_eq!(draft.tag_ids.len(), 1);
        assert!(!draft.published);
    }

    #[test]
    fn test_patch_keeps_absent_fields_absent() {
        let req: PostRequest = serde_json::from_str(r#"{"published": true}"#).unwrap();
        let patch = req.into_patch();
        assert_eq!(patch.published, Some(true));
        assert!(patch.title.is_none());
        assert!(patch.tag_ids.is_none());
    }

    #[test]
    fn test_product_type_field_is_named_type() {
        let req: ProductRequest =
            serde_json::from_str(r#"{"name":"Kit","type":"digital","price":9.5}"#).unwrap();
        let draft = req.into_draft();
        assert_eq!(draft.product_type, "digital");
        assert!(draft.active);
    }

    #[test]
    fn test_dashboard_shape() {
        let response = DashboardResponse::from(Dashboard {
            posts: PostCounts { total: 4, published: 3 },
            members: MemberCounts { total: 2, active: 1 },
            videos: 5,
            products: 6,
            recent_contacts: Vec::new(),
            recent_posts: Vec::new(),
            popular_posts: Vec::new(),
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["posts"]["draft"], 1);
        assert_eq!(json["members"]["inactive"], 1);
        assert_eq!(json["content"]["videos"], 5);
        assert!(json["recent"]["contacts"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_unhealthy_report() {
        let response = HealthResponse::from(HealthReport {
            database_ok: false,
            database_error: Some("connection refused".into()),
            latency_ms: 12,
            checked_at: Utc::now(),
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["services"]["database"]["status"], "unhealthy");
        assert_eq!(json["services"]["api"]["status"], "healthy");
        assert!(json["services"]["api"].get("latencyMs").is_none());
    }
}
