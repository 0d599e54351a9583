//! Entity Module

pub mod category;
pub mod contact;
pub mod member;
pub mod post;
pub mod product;
pub mod stats;
pub mod tag;
pub mod video;
