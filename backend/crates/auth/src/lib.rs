//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, token service, configuration
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, the gate middleware, routers
//!
//! ## Features
//! - Email + password sign in, sign up, password change
//! - HS256 tokens delivered as an `HttpOnly; SameSite=Strict` cookie
//! - Server-side sessions: every token names a session row, and deleting
//!   the row (logout) revokes the token
//! - `AuthGate` / `require_role` middleware for role-restricted routes
//!
//! ## Security Model
//! - Passwords hashed with Argon2id on the blocking pool
//! - Unknown email, wrong password and wrong role at login are one error
//! - Any token failure is a bare 401; nothing says which check failed

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::check_session::AuthUser;
pub use application::config::AuthConfig;
pub use domain::repository::{AccountRepository, AuthSessionRepository, AuthStore};
pub use domain::value_object::user_role::UserRole;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::MemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::middleware::{AuthGate, require_role};
pub use presentation::router::{admin_auth_router, auth_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
