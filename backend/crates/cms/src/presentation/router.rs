//! CMS Routers

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::domain::repository::CmsStore;
use crate::presentation::handlers::{CmsAppState, admin, public};

/// Admin content routes, meant to be nested under `/api/admin`.
///
/// The router carries no gate of its own; callers wrap it with
/// `AuthGate::admin(..).protect(..)`.
pub fn admin_router<R>(repo: Arc<R>) -> Router
where
    R: CmsStore,
{
    Router::new()
        .route(
            "/categories",
            get(admin::list_categories::<R>).post(admin::create_category::<R>),
        )
        .route(
            "/categories/{id}",
            put(admin::update_category::<R>).delete(admin::delete_category::<R>),
        )
        .route("/tags", get(admin::list_tags::<R>).post(admin::create_tag::<R>))
        .route(
            "/tags/{id}",
            put(admin::update_tag::<R>).delete(admin::delete_tag::<R>),
        )
        .route("/posts", get(admin::list_posts::<R>).post(admin::create_post::<R>))
        .route(
            "/posts/{id}",
            get(admin::get_post::<R>)
                .put(admin::update_post::<R>)
                .delete(admin::delete_post::<R>),
        )
        .route(
            "/members",
            get(admin::list_members::<R>).post(admin::create_member::<R>),
        )
        .route(
            "/members/{id}",
            get(admin::get_member::<R>)
                .put(admin::update_member::<R>)
                .delete(admin::delete_member::<R>),
        )
        .route(
            "/products",
            get(admin::list_products::<R>).post(admin::create_product::<R>),
        )
        .route(
            "/products/{id}",
            get(admin::get_product::<R>)
                .put(admin::update_product::<R>)
                .delete(admin::delete_product::<R>),
        )
        .route(
            "/videos",
            get(admin::list_videos::<R>).post(admin::create_video::<R>),
        )
        .route(
            "/videos/{id}",
            put(admin::update_video::<R>).delete(admin::delete_video::<R>),
        )
        .route("/contacts", get(admin::list_contacts::<R>))
        .route("/contacts/{id}/read", post(admin::mark_contact_read::<R>))
        .route("/dashboard", get(admin::dashboard::<R>))
        .with_state(CmsAppState { repo })
}

/// Open routes, meant to be nested under `/api`
pub fn public_router<R>(repo: Arc<R>) -> Router
where
    R: CmsStore,
{
    Router::new()
        .route("/health", get(public::health::<R>))
        .route("/blog/posts", get(public::list_blog_posts::<R>))
        .route("/blog/posts/{slug}", get(public::read_blog_post::<R>))
        .route("/blog/categories", get(public::list_blog_categories::<R>))
        .route("/blog/stats", get(public::blog_stats::<R>))
        .route("/products", get(public::list_catalog_products::<R>))
        .route("/videos", get(public::list_published_videos::<R>))
        .route("/contact", post(public::submit_contact::<R>))
        .with_state(CmsAppState { repo })
}
