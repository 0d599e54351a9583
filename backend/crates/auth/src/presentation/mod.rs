//! Presentation Layer
//!
//! HTTP handlers, DTOs, extractors, the gate middleware and routers.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
