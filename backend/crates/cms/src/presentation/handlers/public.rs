//! Public handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;
use kernel::error::app_error::AppError;
use kernel::pagination::PageRequest;

use super::{CmsAppState, code_filter, non_blank};
use crate::application::{
    CategoryService, ContactService, PostService, ProductService, StatsService, VideoService,
};
use crate::domain::entity::{post::PostFilter, product::ProductFilter, video::VideoFilter};
use crate::domain::repository::CmsStore;
use crate::error::CmsResult;
use crate::presentation::dto::{
    BlogPostQuery, BlogStatsResponse, CatalogQuery, CategoryDto, ContactRequest,
    ContactSubmittedResponse, HealthResponse, PostDto, PostListResponse, ProductDto,
    VideoListResponse, VideoDto, VideoQuery,
};

/// GET /api/health
///
/// 200 when the store answers, 503 otherwise. Never an error body.
pub async fn health<R>(State(state): State<CmsAppState<R>>) -> (StatusCode, Json<HealthResponse>)
where
    R: CmsStore,
{
    let report = StatsService::new(state.repo).health().await;
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report.into()))
}

// ============================================================================
// Blog
// ============================================================================

/// GET /api/blog/posts?page&limit&category&tag&search
pub async fn list_blog_posts<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Query(query), _): WithRejection<Query<BlogPostQuery>, AppError>,
) -> CmsResult<Json<PostListResponse>>
where
    R: CmsStore,
{
    let page = PageRequest::new(query.page, query.limit);
    let filter = PostFilter {
        category_slug: non_blank(query.category),
        tag_slug: non_blank(query.tag),
        search: non_blank(query.search),
        ..Default::default()
    };

    let result = PostService::new(state.repo)
        .list_published(filter, page)
        .await?;
    Ok(Json(PostListResponse {
        pagination: page.paginate(result.total),
        posts: result.items.into_iter().map(PostDto::from).collect(),
    }))
}

/// GET /api/blog/posts/{slug}
///
/// Counts the view.
pub async fn read_blog_post<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Path(slug), _): WithRejection<Path<String>, AppError>,
) -> CmsResult<Json<PostDto>>
where
    R: CmsStore,
{
    let post = PostService::new(state.repo).read(&slug).await?;
    Ok(Json(post.into()))
}

/// GET /api/blog/categories
pub async fn list_blog_categories<R>(
    State(state): State<CmsAppState<R>>,
) -> CmsResult<Json<Vec<CategoryDto>>>
where
    R: CmsStore,
{
    let categories = CategoryService::new(state.repo).list().await?;
    Ok(Json(categories.into_iter().map(CategoryDto::from).collect()))
}

/// GET /api/blog/stats
pub async fn blog_stats<R>(State(state): State<CmsAppState<R>>) -> CmsResult<Json<BlogStatsResponse>>
where
    R: CmsStore,
{
    let stats = StatsService::new(state.repo).blog_stats().await?;
    Ok(Json(stats.into()))
}

// ============================================================================
// Catalog
// ============================================================================

/// GET /api/products?category&featured&type
pub async fn list_catalog_products<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Query(query), _): WithRejection<Query<CatalogQuery>, AppError>,
) -> CmsResult<Json<Vec<ProductDto>>>
where
    R: CmsStore,
{
    let filter = ProductFilter {
        featured_only: query.featured.unwrap_or(false),
        category: code_filter("Category", query.category)?,
        product_type: code_filter("Type", query.product_type)?,
        ..Default::default()
    };

    let products = ProductService::new(state.repo).list_active(filter).await?;
    Ok(Json(products.into_iter().map(ProductDto::from).collect()))
}

/// GET /api/videos?page&limit&featured
pub async fn list_published_videos<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Query(query), _): WithRejection<Query<VideoQuery>, AppError>,
) -> CmsResult<Json<VideoListResponse>>
where
    R: CmsStore,
{
    let page = PageRequest::new(query.page, query.limit);
    let filter = VideoFilter {
        published_only: true,
        featured_only: query.featured.unwrap_or(false),
    };

    let result = VideoService::new(state.repo).list(filter, page).await?;
    Ok(Json(VideoListResponse {
        pagination: page.paginate(result.total),
        videos: result.items.into_iter().map(VideoDto::from).collect(),
    }))
}

// ============================================================================
// Contact form
// ============================================================================

/// POST /api/contact
pub async fn submit_contact<R>(
    State(state): State<CmsAppState<R>>,
    WithRejection(Json(req), _): WithRejection<Json<ContactRequest>, AppError>,
) -> CmsResult<(StatusCode, Json<ContactSubmittedResponse>)>
where
    R: CmsStore,
{
    ContactService::new(state.repo).submit(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ContactSubmittedResponse {
            success: true,
            message: "Message sent successfully",
        }),
    ))
}
