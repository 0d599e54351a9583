//! Auth Error Types
//!
//! Auth-specific error variants that render through the unified
//! `kernel::error::AppError` JSON body.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Login body without email or password
    #[error("Email and password are required")]
    MissingCredentials,

    /// Wrong password, unknown email, or insufficient role at login.
    /// One variant so the three cases cannot be told apart.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Current password did not match on password change
    #[error("Current password is incorrect")]
    WrongCurrentPassword,

    /// No token, bad token, or revoked/expired session
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated but the role is insufficient
    #[error("Forbidden")]
    Forbidden,

    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    PasswordPolicy(#[from] PasswordPolicyError),

    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] PasswordHashError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingCredentials
            | AuthError::InvalidInput(_)
            | AuthError::PasswordPolicy(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials
            | AuthError::WrongCurrentPassword
            | AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::PasswordHash(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
            AuthError::Database(e) => AppError::from_sqlx_ref(e).kind(),
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            // Keep the store's own classification (e.g. pool exhaustion → 503)
            AuthError::Database(e) => AppError::from(e),
            AuthError::PasswordHash(e) => AppError::internal("Password hashing failed").with_source(e),
            AuthError::PasswordPolicy(_) => AppError::new(self.kind(), self.to_string())
                .with_action("Choose a longer, less predictable password"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::WrongCurrentPassword => {
                tracing::warn!("Password change with wrong current password");
            }
            AuthError::Forbidden => {
                tracing::warn!("Access denied for insufficient role");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

/// Validation errors raised by value objects
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::InvalidInput(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("Blocking task failed: {err}"))
    }
}
