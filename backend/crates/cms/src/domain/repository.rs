//! Repository Traits
//!
//! Interfaces for content persistence. Implementations live in the infra
//! layer. `update` and `delete` report whether a row was touched so the
//! application layer can answer 404.

use kernel::pagination::{Page, PageRequest};

use crate::domain::entity::{
    category::Category,
    contact::Contact,
    member::{Member, MemberFilter},
    post::{Post, PostFilter, PostView},
    product::{Product, ProductFilter},
    stats::{BlogStats, Dashboard},
    tag::Tag,
    video::{Video, VideoFilter},
};
use crate::domain::value_object::{
    CategoryId, ContactMessageId, MemberId, PostId, ProductId, TagId, VideoId,
};
use crate::error::CmsResult;

#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    /// All categories with post counts, by name
    async fn list_categories(&self) -> CmsResult<Vec<Category>>;

    async fn find_category(&self, id: &CategoryId) -> CmsResult<Option<Category>>;

    async fn insert_category(&self, category: &Category) -> CmsResult<()>;

    /// Insert unless the slug exists. Returns whether a row was written.
    async fn insert_category_if_absent(&self, category: &Category) -> CmsResult<bool>;

    async fn update_category(&self, category: &Category) -> CmsResult<bool>;

    async fn delete_category(&self, id: &CategoryId) -> CmsResult<bool>;
}

#[trait_variant::make(TagRepository: Send)]
pub trait LocalTagRepository {
    async fn list_tags(&self) -> CmsResult<Vec<Tag>>;

    async fn find_tag(&self, id: &TagId) -> CmsResult<Option<Tag>>;

    async fn insert_tag(&self, tag: &Tag) -> CmsResult<()>;

    async fn insert_tag_if_absent(&self, tag: &Tag) -> CmsResult<bool>;

    async fn update_tag(&self, tag: &Tag) -> CmsResult<bool>;

    async fn delete_tag(&self, id: &TagId) -> CmsResult<bool>;
}

#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Newest first
    async fn list_posts(&self, filter: &PostFilter, page: PageRequest) -> CmsResult<Page<PostView>>;

    async fn find_post(&self, id: &PostId) -> CmsResult<Option<PostView>>;

    /// Published post by slug. Counts the view in the same statement that
    /// finds it.
    async fn view_published_post(&self, slug: &str) -> CmsResult<Option<PostView>>;

    /// Insert the post and its tag links in one transaction
    async fn insert_post(&self, post: &Post, tag_ids: &[TagId]) -> CmsResult<()>;

    /// `tag_ids: Some` replaces the tag links
    async fn update_post(&self, post: &Post, tag_ids: Option<&[TagId]>) -> CmsResult<bool>;

    async fn delete_post(&self, id: &PostId) -> CmsResult<bool>;
}

#[trait_variant::make(MemberRepository: Send)]
pub trait LocalMemberRepository {
    async fn list_members(&self, filter: &MemberFilter, page: PageRequest) -> CmsResult<Page<Member>>;

    async fn find_member(&self, id: &MemberId) -> CmsResult<Option<Member>>;

    async fn insert_member(&self, member: &Member) -> CmsResult<()>;

    async fn update_member(&self, member: &Member) -> CmsResult<bool>;

    async fn delete_member(&self, id: &MemberId) -> CmsResult<bool>;
}

#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    /// Featured first, then newest. `page: None` returns every match.
    async fn list_products(
        &self,
        filter: &ProductFilter,
        page: Option<PageRequest>,
    ) -> CmsResult<Page<Product>>;

    async fn find_product(&self, id: &ProductId) -> CmsResult<Option<Product>>;

    async fn insert_product(&self, product: &Product) -> CmsResult<()>;

    async fn update_product(&self, product: &Product) -> CmsResult<bool>;

    async fn delete_product(&self, id: &ProductId) -> CmsResult<bool>;
}

#[trait_variant::make(VideoRepository: Send)]
pub trait LocalVideoRepository {
    async fn list_videos(&self, filter: VideoFilter, page: PageRequest) -> CmsResult<Page<Video>>;

    async fn find_video(&self, id: &VideoId) -> CmsResult<Option<Video>>;

    async fn insert_video(&self, video: &Video) -> CmsResult<()>;

    async fn update_video(&self, video: &Video) -> CmsResult<bool>;

    async fn delete_video(&self, id: &VideoId) -> CmsResult<bool>;
}

#[trait_variant::make(ContactRepository: Send)]
pub trait LocalContactRepository {
    async fn insert_contact(&self, contact: &Contact) -> CmsResult<()>;

    /// Newest first
    async fn list_contacts(&self, unread_only: bool) -> CmsResult<Vec<Contact>>;

    async fn mark_contact_read(&self, id: &ContactMessageId) -> CmsResult<bool>;
}

#[trait_variant::make(StatsRepository: Send)]
pub trait LocalStatsRepository {
    async fn dashboard(&self) -> CmsResult<Dashboard>;

    async fn blog_stats(&self) -> CmsResult<BlogStats>;

    /// Round trip to the store
    async fn ping(&self) -> CmsResult<()>;
}

/// Everything the content handlers need from storage
pub trait CmsStore:
    CategoryRepository
    + TagRepository
    + PostRepository
    + MemberRepository
    + ProductRepository
    + VideoRepository
    + ContactRepository
    + StatsRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> CmsStore for T where
    T: CategoryRepository
        + TagRepository
        + PostRepository
        + MemberRepository
        + ProductRepository
        + VideoRepository
        + ContactRepository
        + StatsRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
