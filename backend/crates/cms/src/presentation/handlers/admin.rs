//! Admin handlers
//!
//! Every route here is mounted behind `AuthGate::admin`, so handlers never
//! check roles themselves.

use auth::AuthUser;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;
use kernel::error::app_error::AppError;
use kernel::pagination::PageRequest;

use super::{CmsAppState, code_filter, non_blank};
use crate::application::posts::parse_status;
use crate::application::{
    CategoryService, ContactService, MemberService, PostService, ProductService, StatsService,
    TagService, VideoService,
};
use crate::domain::entity::{
    member::{MemberFilter, MemberStatus},
    post::PostFilter,
    product::ProductFilter,
    video::VideoFilter,
};
use crate::domain::repository::CmsStore;
use crate::domain::value_object::{
    CategoryId, ContactMessageId, MemberId, PostId, ProductId, TagId, VideoId,
};
use crate::error::CmsResult;
use crate::presentation::dto::{
    AdminPostQuery, AdminProductQuery, CategoryDto, CategoryRequest, ContactDto, ContactQuery,
    DashboardResponse, MemberDto, MemberListResponse, MemberQuery, MemberRequest, PostDto,
    PostListResponse, PostRequest, ProductDto, ProductListResponse, ProductRequest,
    SuccessResponse, TagDto, TagRequest, VideoDto, VideoListResponse, VideoQuery, VideoRequest,
};

type Created<T> = (StatusCode, Json<T>);

// ============================================================================
// Categories
// ============================================================================

/// GET /api/admin/categories
pub async fn list_categories<R>(State(state): State<CmsAppState<R>>) -> CmsResult<Json<Vec<CategoryDto>>>
where
    R: CmsStore,
{
    let categories = CategoryService::new(state.repo).list().await?;
    Ok(Json(categories.into_iter().map(CategoryDto::from).collect()))
}

/// POST /api/admin/categories
pub async fn create_category<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Json(req), _): WithRejection<Json<CategoryRequest>, AppError>,
) -> CmsResult<Created<CategoryDto>>
where
    R: CmsStore,
{
    let category = CategoryService::new(state.repo).create(req.into_draft()).await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

/// PUT /api/admin/categories/{id}
pub async fn update_category<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<CategoryId>, AppError>,
    WithRejection(Json(req), _): WithRejection<Json<CategoryRequest>, AppError>,
) -> CmsResult<Json<CategoryDto>>
where
    R: CmsStore,
{
    let category = CategoryService::new(state.repo)
        .update(&id, req.into_patch())
        .await?;
    Ok(Json(category.into()))
}

/// DELETE /api/admin/categories/{id}
pub async fn delete_category<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<CategoryId>, AppError>,
) -> CmsResult<Json<SuccessResponse>>
where
    R: CmsStore,
{
    CategoryService::new(state.repo).delete(&id).await?;
    Ok(Json(SuccessResponse::OK))
}

// ============================================================================
// Tags
// ============================================================================

/// GET /api/admin/tags
pub async fn list_tags<R>(State(state): State<CmsAppState<R>>) -> CmsResult<Json<Vec<TagDto>>>
where
    R: CmsStore,
{
    let tags = TagService::new(state.repo).list().await?;
    Ok(Json(tags.into_iter().map(TagDto::from).collect()))
}

/// POST /api/admin/tags
pub async fn create_tag<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Json(req), _): WithRejection<Json<TagRequest>, AppError>,
) -> CmsResult<Created<TagDto>>
where
    R: CmsStore,
{
    let tag = TagService::new(state.repo).create(req.into_draft()).await?;
    Ok((StatusCode::CREATED, Json(tag.into())))
}

/// PUT /api/admin/tags/{id}
pub async fn update_tag<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<TagId>, AppError>,
    WithRejection(Json(req), _): WithRejection<Json<TagRequest>, AppError>,
) -> CmsResult<Json<TagDto>>
where
    R: CmsStore,
{
    let tag = TagService::new(state.repo).update(&id, req.into_patch()).await?;
    Ok(Json(tag.into()))
}

/// DELETE /api/admin/tags/{id}
pub async fn delete_tag<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<TagId>, AppError>,
) -> CmsResult<Json<SuccessResponse>>
where
    R: CmsStore,
{
    TagService::new(state.repo).delete(&id).await?;
    Ok(Json(SuccessResponse::OK))
}

// ============================================================================
// Posts
// ============================================================================

/// GET /api/admin/posts?page&limit&status&search
///
/// Drafts included unless `status=published`.
pub async fn list_posts<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Query(query), _): WithRejection<Query<AdminPostQuery>, AppError>,
) -> CmsResult<Json<PostListResponse>>
where
    R: CmsStore,
{
    let page = PageRequest::new(query.page, query.limit);
    let filter = PostFilter {
        published: parse_status(query.status.as_deref())?,
        search: non_blank(query.search),
        ..Default::default()
    };

    let result = PostService::new(state.repo).list(filter, page).await?;
    Ok(Json(PostListResponse {
        pagination: page.paginate(result.total),
        posts: result.items.into_iter().map(PostDto::from).collect(),
    }))
}

/// POST /api/admin/posts
///
/// The signed-in admin becomes the author.
pub async fn create_post<R>(
    State(state): State<CmsAppState<R>>,
    user: AuthUser,
    WithRejection(Json(req), _): WithRejection<Json<PostRequest>, AppError>,
) -> CmsResult<Created<PostDto>>
where
    R: CmsStore,
{
    let post = PostService::new(state.repo)
        .create(req.into_draft(), user.account_id)
        .await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

/// GET /api/admin/posts/{id}
pub async fn get_post<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<PostId>, AppError>,
) -> CmsResult<Json<PostDto>>
where
    R: CmsStore,
{
    let post = PostService::new(state.repo).get(&id).await?;
    Ok(Json(post.into()))
}

/// PUT /api/admin/posts/{id}
pub async fn update_post<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<PostId>, AppError>,
    WithRejection(Json(req), _): WithRejection<Json<PostRequest>, AppError>,
) -> CmsResult<Json<PostDto>>
where
    R: CmsStore,
{
    let post = PostService::new(state.repo)
        .update(&id, req.into_patch())
        .await?;
    Ok(Json(post.into()))
}

/// DELETE /api/admin/posts/{id}
pub async fn delete_post<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<PostId>, AppError>,
) -> CmsResult<Json<SuccessResponse>>
where
    R: CmsStore,
{
    PostService::new(state.repo).delete(&id).await?;
    Ok(Json(SuccessResponse::OK))
}

// ============================================================================
// Members
// ============================================================================

/// GET /api/admin/members?page&limit&plan&status&search
pub async fn list_members<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Query(query), _): WithRejection<Query<MemberQuery>, AppError>,
) -> CmsResult<Json<MemberListResponse>>
where
    R: CmsStore,
{
    let page = PageRequest::new(query.page, query.limit);
    let filter = MemberFilter {
        plan: code_filter("Plan", query.plan)?,
        status: non_blank(query.status)
            .as_deref()
            .map(MemberStatus::parse)
            .transpose()?,
        search: non_blank(query.search),
    };

    let result = MemberService::new(state.repo).list(filter, page).await?;
    Ok(Json(MemberListResponse {
        pagination: page.paginate(result.total),
        members: result.items.into_iter().map(MemberDto::from).collect(),
    }))
}

/// POST /api/admin/members
pub async fn create_member<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Json(req), _): WithRejection<Json<MemberRequest>, AppError>,
) -> CmsResult<Created<MemberDto>>
where
    R: CmsStore,
{
    let member = MemberService::new(state.repo).create(req.into_draft()).await?;
    Ok((StatusCode::CREATED, Json(member.into())))
}

/// GET /api/admin/members/{id}
pub async fn get_member<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<MemberId>, AppError>,
) -> CmsResult<Json<MemberDto>>
where
    R: CmsStore,
{
    let member = MemberService::new(state.repo).get(&id).await?;
    Ok(Json(member.into()))
}

/// PUT /api/admin/members/{id}
pub async fn update_member<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<MemberId>, AppError>,
    WithRejection(Json(req), _): WithRejection<Json<MemberRequest>, AppError>,
) -> CmsResult<Json<MemberDto>>
where
    R: CmsStore,
{
    let member = MemberService::new(state.repo)
        .update(&id, req.into_patch())
        .await?;
    Ok(Json(member.into()))
}

/// DELETE /api/admin/members/{id}
pub async fn delete_member<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<MemberId>, AppError>,
) -> CmsResult<Json<SuccessResponse>>
where
    R: CmsStore,
{
    MemberService::new(state.repo).delete(&id).await?;
    Ok(Json(SuccessResponse::OK))
}

// ============================================================================
// Products
// ============================================================================

/// GET /api/admin/products?page&limit&category&search
///
/// Inactive products included.
pub async fn list_products<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Query(query), _): WithRejection<Query<AdminProductQuery>, AppError>,
) -> CmsResult<Json<ProductListResponse>>
where
    R: CmsStore,
{
    let page = PageRequest::new(query.page, query.limit);
    let filter = ProductFilter {
        category: code_filter("Category", query.category)?,
        search: non_blank(query.search),
        ..Default::default()
    };

    let result = ProductService::new(state.repo).list(filter, page).await?;
    Ok(Json(ProductListResponse {
        pagination: page.paginate(result.total),
        products: result.items.into_iter().map(ProductDto::from).collect(),
    }))
}

/// POST /api/admin/products
pub async fn create_product<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Json(req), _): WithRejection<Json<ProductRequest>, AppError>,
) -> CmsResult<Created<ProductDto>>
where
    R: CmsStore,
{
    let product = ProductService::new(state.repo).create(req.into_draft()).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// GET /api/admin/products/{id}
pub async fn get_product<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<ProductId>, AppError>,
) -> CmsResult<Json<ProductDto>>
where
    R: CmsStore,
{
    let product = ProductService::new(state.repo).get(&id).await?;
    Ok(Json(product.into()))
}

/// PUT /api/admin/products/{id}
pub async fn update_product<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<ProductId>, AppError>,
    WithRejection(Json(req), _): WithRejection<Json<ProductRequest>, AppError>,
) -> CmsResult<Json<ProductDto>>
where
    R: CmsStore,
{
    let product = ProductService::new(state.repo)
        .update(&id, req.into_patch())
        .await?;
    Ok(Json(product.into()))
}

/// DELETE /api/admin/products/{id}
pub async fn delete_product<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<ProductId>, AppError>,
) -> CmsResult<Json<SuccessResponse>>
where
    R: CmsStore,
{
    ProductService::new(state.repo).delete(&id).await?;
    Ok(Json(SuccessResponse::OK))
}

// ============================================================================
// Videos
// ============================================================================

/// GET /api/admin/videos?page&limit&featured
///
/// Unpublished videos included.
pub async fn list_videos<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Query(query), _): WithRejection<Query<VideoQuery>, AppError>,
) -> CmsResult<Json<VideoListResponse>>
where
    R: CmsStore,
{
    let page = PageRequest::new(query.page, query.limit);
    let filter = VideoFilter {
        published_only: false,
        featured_only: query.featured.unwrap_or(false),
    };

    let result = VideoService::new(state.repo).list(filter, page).await?;
    Ok(Json(VideoListResponse {
        pagination: page.paginate(result.total),
        videos: result.items.into_iter().map(VideoDto::from).collect(),
    }))
}

/// POST /api/admin/videos
pub async fn create_video<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Json(req), _): WithRejection<Json<VideoRequest>, AppError>,
) -> CmsResult<Created<VideoDto>>
where
    R: CmsStore,
{
    let video = VideoService::new(state.repo).create(req.into_draft()).await?;
    Ok((StatusCode::CREATED, Json(video.into())))
}

/// PUT /api/admin/videos/{id}
pub async fn update_video<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<VideoId>, AppError>,
    WithRejection(Json(req), _): WithRejection<Json<VideoRequest>, AppError>,
) -> CmsResult<Json<VideoDto>>
where
    R: CmsStore,
{
    let video = VideoService::new(state.repo)
        .update(&id, req.into_patch())
        .await?;
    Ok(Json(video.into()))
}

/// DELETE /api/admin/videos/{id}
pub async fn delete_video<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<VideoId>, AppError>,
) -> CmsResult<Json<SuccessResponse>>
where
    R: CmsStore,
{
    VideoService::new(state.repo).delete(&id).await?;
    Ok(Json(SuccessResponse::OK))
}

// ============================================================================
// Contacts
// ============================================================================

/// GET /api/admin/contacts?unread=true
pub async fn list_contacts<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Query(query), _): WithRejection<Query<ContactQuery>, AppError>,
) -> CmsResult<Json<Vec<ContactDto>>>
where
    R: CmsStore,
{
    let contacts = ContactService::new(state.repo).list(query.unread).await?;
    Ok(Json(contacts.into_iter().map(ContactDto::from).collect()))
}

/// POST /api/admin/contacts/{id}/read
pub async fn mark_contact_read<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<ContactMessageId>, AppError>,
) -> CmsResult<Json<SuccessResponse>>
where
    R: CmsStore,
{
    ContactService::new(state.repo).mark_read(&id).await?;
    Ok(Json(SuccessResponse::OK))
}

// ============================================================================
// Dashboard
// ============================================================================

/// GET /api/admin/dashboard
pub async fn dashboard<R>(State(state): State<CmsAppState<R>>) -> CmsResult<Json<DashboardResponse>>
where
    R: CmsStore,
{
    let dashboard = StatsService::new(state.repo).dashboard().await?;
    Ok(Json(dashboard.into()))
}
