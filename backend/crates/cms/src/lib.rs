//! CMS (Content Management) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - One service per content area, default seeding
//! - `infra/` - PostgreSQL repository, in-memory repository
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Content
//! - Blog: categories, tags, posts (view counting, draft/published)
//! - Catalog: members, products, videos
//! - Contact form inbox, admin dashboard, public blog statistics
//!
//! Admin routes carry no authorization of their own. The binary mounts
//! them behind `auth::AuthGate::admin`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use application::seed_defaults;
pub use domain::repository::CmsStore;
pub use error::{CmsError, CmsResult};
pub use infra::memory::MemoryCmsRepository;
pub use infra::postgres::PgCmsRepository;
pub use presentation::router::{admin_router, public_router};
