//! Domain Layer
//!
//! Content entities, their validation rules, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

pub use repository::{
    CategoryRepository, CmsStore, ContactRepository, MemberRepository, PostRepository,
    ProductRepository, StatsRepository, TagRepository, VideoRepository,
};
