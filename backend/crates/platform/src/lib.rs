//! Platform Crate - Technical Infrastructure
//!
//! Technical foundations shared by the domain crates:
//! - Random secrets and base64 helpers
//! - Password hashing (Argon2id) and password policy
//! - Cookie building and extraction
//! - Client IP / user agent extraction
//! - Environment configuration helpers
//! - URL slugs

pub mod client;
pub mod config;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod slug;
