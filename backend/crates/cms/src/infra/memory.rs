//! In-memory repository
//!
//! Same contracts as the PostgreSQL repository, kept in process memory.
//! Unique slugs, category and tag references, and the category delete
//! restriction fail with the same 409 messages the database produces.
//! Author names are not resolved; there is no accounts table here.

use std::sync::Arc;

use kernel::pagination::{Page, PageRequest};
use tokio::sync::RwLock;

use crate::domain::entity::{
    category::Category,
    contact::Contact,
    member::{Member, MemberFilter, MemberStatus},
    post::{CategoryRef, Post, PostFilter, PostView, TagRef},
    product::{Product, ProductFilter},
    stats::{BlogStats, Dashboard, MemberCounts, PostCounts},
    tag::Tag,
    video::{Video, VideoFilter},
};
use crate::domain::repository::{
    CategoryRepository, ContactRepository, MemberRepository, PostRepository, ProductRepository,
    StatsRepository, TagRepository, VideoRepository,
};
use crate::domain::value_object::{
    CategoryId, ContactMessageId, MemberId, PostId, ProductId, TagId, VideoId,
};
use crate::error::{CmsError, CmsResult};

const DUPLICATE: &str = "A record with this value already exists";
const MISSING_REFERENCE: &str = "Referenced record does not exist";
const SHORT_LIST: usize = 5;

/// Rows kept in insertion order, which breaks `created_at` ties
#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    tags: Vec<Tag>,
    posts: Vec<Post>,
    post_tags: Vec<(PostId, TagId)>,
    members: Vec<Member>,
    products: Vec<Product>,
    videos: Vec<Video>,
    contacts: Vec<Contact>,
}

#[derive(Clone, Default)]
pub struct MemoryCmsRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryCmsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate() -> CmsError {
    CmsError::Conflict(DUPLICATE.to_string())
}

fn missing_reference() -> CmsError {
    CmsError::Conflict(MISSING_REFERENCE.to_string())
}

/// Case-insensitive substring match, the ILIKE `%term%` of the SQL side
fn contains(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(&term.trim().to_lowercase())
}

fn search_term(search: &Option<String>) -> Option<&str> {
    search.as_deref().filter(|s| !s.trim().is_empty())
}

fn page_of<T>(items: Vec<T>, page: PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let items = items
        .into_iter()
        .skip(skip)
        .take(page.limit() as usize)
        .collect();
    Page { items, total }
}

fn newest_first<T>(items: &mut [T], created_at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>) {
    items.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
}

impl Tables {
    /// Whether a row other than the one being written already has `slug`
    fn slug_taken<T>(
        rows: &[T],
        slug: &str,
        other_than: impl Fn(&T) -> bool,
        slug_of: impl Fn(&T) -> &str,
    ) -> bool {
        rows.iter().any(|row| other_than(row) && slug_of(row) == slug)
    }

    fn with_category_count(&self, category: &Category) -> Category {
        let mut category = category.clone();
        category.post_count = self
            .posts
            .iter()
            .filter(|p| p.category_id == category.id)
            .count() as i64;
        category
    }

    fn with_tag_count(&self, tag: &Tag) -> Tag {
        let mut tag = tag.clone();
        tag.post_count = self.post_tags.iter().filter(|(_, t)| *t == tag.id).count() as i64;
        tag
    }

    fn tag_ids_exist(&self, tag_ids: &[TagId]) -> bool {
        tag_ids
            .iter()
            .all(|id| self.tags.iter().any(|t| t.id == *id))
    }

    fn link_tags(&mut self, post_id: PostId, tag_ids: &[TagId]) {
        for tag_id in tag_ids {
            if !self.post_tags.contains(&(post_id, *tag_id)) {
                self.post_tags.push((post_id, *tag_id));
            }
        }
    }

    fn view(&self, post: &Post) -> PostView {
        let category = self
            .categories
            .iter()
            .find(|c| c.id == post.category_id)
            .map(|c| CategoryRef {
                id: c.id,
                name: c.name.clone(),
                slug: c.slug.as_str().to_string(),
                color: c.color.as_str().to_string(),
            });

        let mut tags: Vec<TagRef> = self
            .post_tags
            .iter()
            .filter(|(p, _)| *p == post.id)
            .filter_map(|(_, tag_id)| self.tags.iter().find(|t| t.id == *tag_id))
            .map(|t| TagRef {
                id: t.id,
                name: t.name.clone(),
                slug: t.slug.as_str().to_string(),
                color: t.color.as_str().to_string(),
            })
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));

        PostView {
            post: post.clone(),
            author_name: None,
            category,
            tags,
        }
    }

    fn post_matches(&self, post: &Post, filter: &PostFilter) -> bool {
        if filter.published.is_some_and(|published| post.published != published) {
            return false;
        }
        if let Some(slug) = &filter.category_slug {
            let in_category = self
                .categories
                .iter()
                .any(|c| c.id == post.category_id && c.slug.as_str() == slug);
            if !in_category {
                return false;
            }
        }
        if let Some(slug) = &filter.tag_slug {
            let tagged = self
                .post_tags
                .iter()
                .filter(|(p, _)| *p == post.id)
                .any(|(_, tag_id)| {
                    self.tags
                        .iter()
                        .any(|t| t.id == *tag_id && t.slug.as_str() == slug)
                });
            if !tagged {
                return false;
            }
        }
        if let Some(term) = search_term(&filter.search) {
            let hit = contains(&post.title, term)
                || post.excerpt.as_deref().is_some_and(|e| contains(e, term))
                || (filter.search_content && contains(&post.content, term));
            if !hit {
                return false;
            }
        }
        true
    }

    fn newest_posts(&self, filter: &PostFilter) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self
            .posts
            .iter()
            .filter(|p| self.post_matches(p, filter))
            .collect();
        newest_first(&mut posts, |p| p.created_at);
        posts
    }

    fn short_list(&self, posts: Vec<&Post>) -> Vec<PostView> {
        posts.into_iter().take(SHORT_LIST).map(|p| self.view(p)).collect()
    }

    fn most_viewed_published(&self) -> Vec<PostView> {
        let mut posts = self.newest_posts(&PostFilter {
            published: Some(true),
            ..Default::default()
        });
        // Stable sort keeps newest first among equal view counts
        posts.sort_by(|a, b| b.views.cmp(&a.views));
        self.short_list(posts)
    }

    fn post_counts(&self) -> PostCounts {
        PostCounts {
            total: self.posts.len() as i64,
            published: self.posts.iter().filter(|p| p.published).count() as i64,
        }
    }

    fn sorted_categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self
            .categories
            .iter()
            .map(|c| self.with_category_count(c))
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        categories
    }
}

fn product_matches(product: &Product, filter: &ProductFilter) -> bool {
    (!filter.active_only || product.active)
        && (!filter.featured_only || product.featured)
        && filter.category.as_ref().is_none_or(|c| &product.category == c)
        && filter
            .product_type
            .as_ref()
            .is_none_or(|t| &product.product_type == t)
        && search_term(&filter.search).is_none_or(|term| {
            contains(&product.name, term)
                || product
                    .description
                    .as_deref()
                    .is_some_and(|d| contains(d, term))
        })
}

fn member_matches(member: &Member, filter: &MemberFilter) -> bool {
    filter.plan.as_ref().is_none_or(|p| &member.plan == p)
        && filter.status.is_none_or(|s| member.status == s)
        && search_term(&filter.search)
            .is_none_or(|term| contains(&member.name, term) || contains(&member.email, term))
}

// ============================================================================
// Categories and tags
// ============================================================================

impl CategoryRepository for MemoryCmsRepository {
    async fn list_categories(&self) -> CmsResult<Vec<Category>> {
        Ok(self.tables.read().await.sorted_categories())
    }

    async fn find_category(&self, id: &CategoryId) -> CmsResult<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .iter()
            .find(|c| c.id == *id)
            .map(|c| tables.with_category_count(c)))
    }

    async fn insert_category(&self, category: &Category) -> CmsResult<()> {
        let mut tables = self.tables.write().await;
        if Tables::slug_taken(
            &tables.categories,
            category.slug.as_str(),
            |_| true,
            |c| c.slug.as_str(),
        ) {
            return Err(duplicate());
        }
        tables.categories.push(category.clone());
        Ok(())
    }

    async fn insert_category_if_absent(&self, category: &Category) -> CmsResult<bool> {
        let mut tables = self.tables.write().await;
        if Tables::slug_taken(
            &tables.categories,
            category.slug.as_str(),
            |_| true,
            |c| c.slug.as_str(),
        ) {
            return Ok(false);
        }
        tables.categories.push(category.clone());
        Ok(true)
    }

    async fn update_category(&self, category: &Category) -> CmsResult<bool> {
        let mut tables = self.tables.write().await;
        if Tables::slug_taken(
            &tables.categories,
            category.slug.as_str(),
            |c| c.id != category.id,
            |c| c.slug.as_str(),
        ) {
            return Err(duplicate());
        }
        let Some(stored) = tables.categories.iter_mut().find(|c| c.id == category.id) else {
            return Ok(false);
        };
        *stored = category.clone();
        Ok(true)
    }

    async fn delete_category(&self, id: &CategoryId) -> CmsResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.posts.iter().any(|p| p.category_id == *id) {
            return Err(CmsError::Conflict("Category still has posts".to_string()));
        }
        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != *id);
        Ok(tables.categories.len() < before)
    }
}

impl TagRepository for MemoryCmsRepository {
    async fn list_tags(&self) -> CmsResult<Vec<Tag>> {
        let tables = self.tables.read().await;
        let mut tags: Vec<Tag> = tables.tags.iter().map(|t| tables.with_tag_count(t)).collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn find_tag(&self, id: &TagId) -> CmsResult<Option<Tag>> {
        let tables = self.tables.read().await;
        Ok(tables
            .tags
            .iter()
            .find(|t| t.id == *id)
            .map(|t| tables.with_tag_count(t)))
    }

    async fn insert_tag(&self, tag: &Tag) -> CmsResult<()> {
        let mut tables = self.tables.write().await;
        if Tables::slug_taken(&tables.tags, tag.slug.as_str(), |_| true, |t| t.slug.as_str()) {
            return Err(duplicate());
        }
        tables.tags.push(tag.clone());
        Ok(())
    }

    async fn insert_tag_if_absent(&self, tag: &Tag) -> CmsResult<bool> {
        let mut tables = self.tables.write().await;
        if Tables::slug_taken(&tables.tags, tag.slug.as_str(), |_| true, |t| t.slug.as_str()) {
            return Ok(false);
        }
        tables.tags.push(tag.clone());
        Ok(true)
    }

    async fn update_tag(&self, tag: &Tag) -> CmsResult<bool> {
        let mut tables = self.tables.write().await;
        if Tables::slug_taken(
            &tables.tags,
            tag.slug.as_str(),
            |t| t.id != tag.id,
            |t| t.slug.as_str(),
        ) {
            return Err(duplicate());
        }
        let Some(stored) = tables.tags.iter_mut().find(|t| t.id == tag.id) else {
            return Ok(false);
        };
        *stored = tag.clone();
        Ok(true)
    }

    async fn delete_tag(&self, id: &TagId) -> CmsResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.tags.len();
        tables.tags.retain(|t| t.id != *id);
        if tables.tags.len() == before {
            return Ok(false);
        }
        tables.post_tags.retain(|(_, tag_id)| tag_id != id);
        Ok(true)
    }
}

// ============================================================================
// Posts
// ============================================================================

impl PostRepository for MemoryCmsRepository {
    async fn list_posts(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> CmsResult<Page<PostView>> {
        let tables = self.tables.read().await;
        let views = tables
            .newest_posts(filter)
            .into_iter()
            .map(|p| tables.view(p))
            .collect();
        Ok(page_of(views, page))
    }

    async fn find_post(&self, id: &PostId) -> CmsResult<Option<PostView>> {
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().find(|p| p.id == *id).map(|p| tables.view(p)))
    }

    async fn view_published_post(&self, slug: &str) -> CmsResult<Option<PostView>> {
        let mut tables = self.tables.write().await;
        let Some(post) = tables
            .posts
            .iter_mut()
            .find(|p| p.published && p.slug.as_str() == slug)
        else {
            return Ok(None);
        };
        post.views += 1;
        let post = post.clone();
        Ok(Some(tables.view(&post)))
    }

    async fn insert_post(&self, post: &Post, tag_ids: &[TagId]) -> CmsResult<()> {
        let mut tables = self.tables.write().await;
        if Tables::slug_taken(&tables.posts, post.slug.as_str(), |_| true, |p| p.slug.as_str()) {
            return Err(duplicate());
        }
        let category_exists = tables.categories.iter().any(|c| c.id == post.category_id);
        if !category_exists || !tables.tag_ids_exist(tag_ids) {
            return Err(missing_reference());
        }
        tables.posts.push(post.clone());
        tables.link_tags(post.id, tag_ids);
        Ok(())
    }

    async fn update_post(&self, post: &Post, tag_ids: Option<&[TagId]>) -> CmsResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.posts.iter().any(|p| p.id == post.id) {
            return Ok(false);
        }
        if Tables::slug_taken(
            &tables.posts,
            post.slug.as_str(),
            |p| p.id != post.id,
            |p| p.slug.as_str(),
        ) {
            return Err(duplicate());
        }
        let tags_ok = tag_ids.is_none_or(|ids| tables.tag_ids_exist(ids));
        if !tables.categories.iter().any(|c| c.id == post.category_id) || !tags_ok {
            return Err(missing_reference());
        }

        if let Some(stored) = tables.posts.iter_mut().find(|p| p.id == post.id) {
            // The stored counter wins over the copy the caller loaded
            let views = stored.views;
            *stored = post.clone();
            stored.views = views;
        }
        if let Some(ids) = tag_ids {
            tables.post_tags.retain(|(p, _)| *p != post.id);
            tables.link_tags(post.id, ids);
        }
        Ok(true)
    }

    async fn delete_post(&self, id: &PostId) -> CmsResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != *id);
        if tables.posts.len() == before {
            return Ok(false);
        }
        tables.post_tags.retain(|(p, _)| p != id);
        Ok(true)
    }
}

// ============================================================================
// Members
// ============================================================================

impl MemberRepository for MemoryCmsRepository {
    async fn list_members(
        &self,
        filter: &MemberFilter,
        page: PageRequest,
    ) -> CmsResult<Page<Member>> {
        let tables = self.tables.read().await;
        let mut members: Vec<Member> = tables
            .members
            .iter()
            .filter(|m| member_matches(m, filter))
            .cloned()
            .collect();
        newest_first(&mut members, |m| m.created_at);
        Ok(page_of(members, page))
    }

    async fn find_member(&self, id: &MemberId) -> CmsResult<Option<Member>> {
        Ok(self.tables.read().await.members.iter().find(|m| m.id == *id).cloned())
    }

    async fn insert_member(&self, member: &Member) -> CmsResult<()> {
        self.tables.write().await.members.push(member.clone());
        Ok(())
    }

    async fn update_member(&self, member: &Member) -> CmsResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables.members.iter_mut().find(|m| m.id == member.id) else {
            return Ok(false);
        };
        *stored = member.clone();
        Ok(true)
    }

    async fn delete_member(&self, id: &MemberId) -> CmsResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.members.len();
        tables.members.retain(|m| m.id != *id);
        Ok(tables.members.len() < before)
    }
}

// ============================================================================
// Products and videos
// ============================================================================

impl ProductRepository for MemoryCmsRepository {
    async fn list_products(
        &self,
        filter: &ProductFilter,
        page: Option<PageRequest>,
    ) -> CmsResult<Page<Product>> {
        let tables = self.tables.read().await;
        let mut products: Vec<Product> = tables
            .products
            .iter()
            .filter(|p| product_matches(p, filter))
            .cloned()
            .collect();
        newest_first(&mut products, |p| p.created_at);
        products.sort_by(|a, b| b.featured.cmp(&a.featured));

        match page {
            Some(page) => Ok(page_of(products, page)),
            None => {
                let total = products.len() as u64;
                Ok(Page { items: products, total })
            }
        }
    }

    async fn find_product(&self, id: &ProductId) -> CmsResult<Option<Product>> {
        Ok(self.tables.read().await.products.iter().find(|p| p.id == *id).cloned())
    }

    async fn insert_product(&self, product: &Product) -> CmsResult<()> {
        let mut tables = self.tables.write().await;
        if Tables::slug_taken(
            &tables.products,
            product.slug.as_str(),
            |_| true,
            |p| p.slug.as_str(),
        ) {
            return Err(duplicate());
        }
        tables.products.push(product.clone());
        Ok(())
    }

    async fn update_product(&self, product: &Product) -> CmsResult<bool> {
        let mut tables = self.tables.write().await;
        if Tables::slug_taken(
            &tables.products,
            product.slug.as_str(),
            |p| p.id != product.id,
            |p| p.slug.as_str(),
        ) {
            return Err(duplicate());
        }
        let Some(stored) = tables.products.iter_mut().find(|p| p.id == product.id) else {
            return Ok(false);
        };
        *stored = product.clone();
        Ok(true)
    }

    async fn delete_product(&self, id: &ProductId) -> CmsResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.products.len();
        tables.products.retain(|p| p.id != *id);
        Ok(tables.products.len() < before)
    }
}

impl VideoRepository for MemoryCmsRepository {
    async fn list_videos(&self, filter: VideoFilter, page: PageRequest) -> CmsResult<Page<Video>> {
        let tables = self.tables.read().await;
        let mut videos: Vec<Video> = tables
            .videos
            .iter()
            .filter(|v| !filter.published_only || v.published)
            .filter(|v| !filter.featured_only || v.featured)
            .cloned()
            .collect();
        newest_first(&mut videos, |v| v.created_at);
        Ok(page_of(videos, page))
    }

    async fn find_video(&self, id: &VideoId) -> CmsResult<Option<Video>> {
        Ok(self.tables.read().await.videos.iter().find(|v| v.id == *id).cloned())
    }

    async fn insert_video(&self, video: &Video) -> CmsResult<()> {
        self.tables.write().await.videos.push(video.clone());
        Ok(())
    }

    async fn update_video(&self, video: &Video) -> CmsResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables.videos.iter_mut().find(|v| v.id == video.id) else {
            return Ok(false);
        };
        *stored = video.clone();
        Ok(true)
    }

    async fn delete_video(&self, id: &VideoId) -> CmsResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.videos.len();
        tables.videos.retain(|v| v.id != *id);
        Ok(tables.videos.len() < before)
    }
}

// ============================================================================
// Contacts and statistics
// ============================================================================

impl ContactRepository for MemoryCmsRepository {
    async fn insert_contact(&self, contact: &Contact) -> CmsResult<()> {
        self.tables.write().await.contacts.push(contact.clone());
        Ok(())
    }

    async fn list_contacts(&self, unread_only: bool) -> CmsResult<Vec<Contact>> {
        let tables = self.tables.read().await;
        let mut contacts: Vec<Contact> = tables
            .contacts
            .iter()
            .filter(|c| !unread_only || !c.read)
            .cloned()
            .collect();
        newest_first(&mut contacts, |c| c.created_at);
        Ok(contacts)
    }

    async fn mark_contact_read(&self, id: &ContactMessageId) -> CmsResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(contact) = tables.contacts.iter_mut().find(|c| c.id == *id) else {
            return Ok(false);
        };
        contact.read = true;
        Ok(true)
    }
}

impl StatsRepository for MemoryCmsRepository {
    async fn dashboard(&self) -> CmsResult<Dashboard> {
        let tables = self.tables.read().await;

        let mut recent_contacts: Vec<Contact> =
            tables.contacts.iter().filter(|c| !c.read).cloned().collect();
        newest_first(&mut recent_contacts, |c| c.created_at);
        recent_contacts.truncate(SHORT_LIST);

        Ok(Dashboard {
            posts: tables.post_counts(),
            members: MemberCounts {
                total: tables.members.len() as i64,
                active: tables
                    .members
                    .iter()
                    .filter(|m| m.status == MemberStatus::Active)
                    .count() as i64,
            },
            videos: tables.videos.iter().filter(|v| v.published).count() as i64,
            products: tables.products.iter().filter(|p| p.active).count() as i64,
            recent_contacts,
            recent_posts: tables.short_list(tables.newest_posts(&PostFilter::default())),
            popular_posts: tables.most_viewed_published(),
        })
    }

    async fn blog_stats(&self) -> CmsResult<BlogStats> {
        let tables = self.tables.read().await;
        let published = PostFilter {
            published: Some(true),
            ..Default::default()
        };

        Ok(BlogStats {
            posts: tables.post_counts(),
            total_views: tables.posts.iter().map(|p| p.views).sum(),
            recent_posts: tables.short_list(tables.newest_posts(&published)),
            popular_posts: tables.most_viewed_published(),
            categories: tables.sorted_categories(),
        })
    }

    async fn ping(&self) -> CmsResult<()> {
        Ok(())
    }
}
