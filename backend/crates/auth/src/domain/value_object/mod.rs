//! Value Object Module

pub mod display_name;
pub mod email;
pub mod user_role;

pub use kernel::id::{AccountId, SessionId};
