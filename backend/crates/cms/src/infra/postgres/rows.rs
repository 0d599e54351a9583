//! Row types for sqlx mapping

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entity::{
    category::Category,
    contact::Contact,
    member::{Member, MemberStatus},
    post::{CategoryRef, Post, PostView, TagRef},
    product::Product,
    tag::Tag,
    video::Video,
};
use crate::domain::value_object::{
    AccountId, CategoryId, Code, ContactMessageId, HexColor, MemberId, PostId, ProductId, Slug,
    TagId, VideoId,
};
use crate::error::CmsResult;

#[derive(sqlx::FromRow)]
pub(super) struct CategoryRow {
    category_id: Uuid,
    name: String,
    slug: String,
    description: Option<String>,
    color: String,
    post_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CategoryRow {
    pub(super) fn into_category(self) -> Category {
        Category {
            id: CategoryId::from_uuid(self.category_id),
            name: self.name,
            slug: Slug::from_db(self.slug),
            description: self.description,
            color: HexColor::from_db(self.color),
            post_count: self.post_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct TagRow {
    tag_id: Uuid,
    name: String,
    slug: String,
    color: String,
    post_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TagRow {
    pub(super) fn into_tag(self) -> Tag {
        Tag {
            id: TagId::from_uuid(self.tag_id),
            name: self.name,
            slug: Slug::from_db(self.slug),
            color: HexColor::from_db(self.color),
            post_count: self.post_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A post joined with its author name and category
#[derive(sqlx::FromRow)]
pub(super) struct PostRow {
    pub(super) post_id: Uuid,
    title: String,
    slug: String,
    excerpt: Option<String>,
    content: String,
    image: Option<String>,
    published: bool,
    featured: bool,
    author_id: Option<Uuid>,
    category_id: Uuid,
    seo_title: Option<String>,
    seo_description: Option<String>,
    seo_keywords: Option<String>,
    read_time: Option<String>,
    views: i64,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_name: Option<String>,
    category_name: Option<String>,
    category_slug: Option<String>,
    category_color: Option<String>,
}

impl PostRow {
    /// Tags are attached afterwards
    pub(super) fn into_view(self) -> PostView {
        let category = match (self.category_name, self.category_slug, self.category_color) {
            (Some(name), Some(slug), Some(color)) => Some(CategoryRef {
                id: CategoryId::from_uuid(self.category_id),
                name,
                slug,
                color,
            }),
            _ => None,
        };

        PostView {
            post: Post {
                id: PostId::from_uuid(self.post_id),
                title: self.title,
                slug: Slug::from_db(self.slug),
                excerpt: self.excerpt,
                content: self.content,
                image: self.image,
                published: self.published,
                featured: self.featured,
                author_id: self.author_id.map(AccountId::from_uuid),
                category_id: CategoryId::from_uuid(self.category_id),
                seo_title: self.seo_title,
                seo_description: self.seo_description,
                seo_keywords: self.seo_keywords,
                read_time: self.read_time,
                views: self.views,
                published_at: self.published_at,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            author_name: self.author_name,
            category,
            tags: Vec::new(),
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct PostTagRow {
    pub(super) post_id: Uuid,
    tag_id: Uuid,
    name: String,
    slug: String,
    color: String,
}

impl PostTagRow {
    pub(super) fn into_ref(self) -> TagRef {
        TagRef {
            id: TagId::from_uuid(self.tag_id),
            name: self.name,
            slug: self.slug,
            color: self.color,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct MemberRow {
    member_id: Uuid,
    name: String,
    email: String,
    plan: String,
    status: String,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MemberRow {
    pub(super) fn into_member(self) -> CmsResult<Member> {
        Ok(Member {
            id: MemberId::from_uuid(self.member_id),
            name: self.name,
            email: self.email,
            plan: Code::from_db(self.plan),
            status: MemberStatus::from_db(&self.status)?,
            expires_at: self.expires_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct ProductRow {
    product_id: Uuid,
    name: String,
    slug: String,
    description: Option<String>,
    long_description: Option<String>,
    price: f64,
    image: Option<String>,
    category: String,
    product_type: String,
    download_url: Option<String>,
    featured: bool,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    pub(super) fn into_product(self) -> Product {
        Product {
            id: ProductId::from_uuid(self.product_id),
            name: self.name,
            slug: Slug::from_db(self.slug),
            description: self.description,
            long_description: self.long_description,
            price: self.price,
            image: self.image,
            category: Code::from_db(self.category),
            product_type: Code::from_db(self.product_type),
            download_url: self.download_url,
            featured: self.featured,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct VideoRow {
    video_id: Uuid,
    title: String,
    description: Option<String>,
    youtube_id: String,
    thumbnail: Option<String>,
    duration: Option<String>,
    published: bool,
    featured: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl VideoRow {
    pub(super) fn into_video(self) -> Video {
        Video {
            id: VideoId::from_uuid(self.video_id),
            title: self.title,
            description: self.description,
            youtube_id: self.youtube_id,
            thumbnail: self.thumbnail,
            duration: self.duration,
            published: self.published,
            featured: self.featured,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct ContactRow {
    contact_id: Uuid,
    name: String,
    email: String,
    subject: String,
    message: String,
    read: bool,
    created_at: DateTime<Utc>,
}

impl ContactRow {
    pub(super) fn into_contact(self) -> Contact {
        Contact {
            id: ContactMessageId::from_uuid(self.contact_id),
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
            read: self.read,
            created_at: self.created_at,
        }
    }
}
