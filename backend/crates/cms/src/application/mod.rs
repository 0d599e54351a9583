//! Application Layer
//!
//! One service per content area. Services validate input through the
//! domain entities, then hand the result to a repository.

pub mod categories;
pub mod contacts;
pub mod members;
pub mod posts;
pub mod products;
pub mod seed;
pub mod stats;
pub mod tags;
pub mod videos;

pub use categories::CategoryService;
pub use contacts::ContactService;
pub use members::MemberService;
pub use posts::PostService;
pub use products::ProductService;
pub use seed::seed_defaults;
pub use stats::{HealthReport, StatsService};
pub use tags::TagService;
pub use videos::VideoService;
