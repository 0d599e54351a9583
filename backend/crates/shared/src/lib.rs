//! Shared Kernel
//!
//! Vocabulary shared by every crate in the workspace:
//! - the unified error type and its HTTP mapping
//! - typed UUID identifiers
//! - pagination of list endpoints
//!
//! Only things whose meaning is identical across the auth and content
//! domains belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod pagination;
