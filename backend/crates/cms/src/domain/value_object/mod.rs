//! Value Objects
//!
//! Validated wrappers shared by the content entities.

pub mod code;
pub mod color;
pub mod slug;
pub mod text;

pub use code::Code;
pub use color::HexColor;
pub use kernel::id::{
    AccountId, CategoryId, ContactMessageId, MemberId, PostId, ProductId, TagId, VideoId,
};
pub use slug::Slug;
