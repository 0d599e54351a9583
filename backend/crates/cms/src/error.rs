//! CMS Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type CmsResult<T> = Result<T, CmsError>;

#[derive(Debug, Error)]
pub enum CmsError {
    /// Entity absent; the message names it ("Post not found")
    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CmsError {
    pub fn invalid(message: impl Into<String>) -> Self {
        CmsError::InvalidInput(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CmsError::NotFound(_) => ErrorKind::NotFound,
            CmsError::InvalidInput(_) => ErrorKind::BadRequest,
            CmsError::Conflict(_) => ErrorKind::Conflict,
            CmsError::Database(e) => AppError::from_sqlx_ref(e).kind(),
            CmsError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn into_app_error(self) -> AppError {
        match self {
            // Unique slug (23505) and missing category (23503) come out as 409
            CmsError::Database(e) => AppError::from(e),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            CmsError::Database(e) => tracing::error!(error = %e, "CMS database error"),
            CmsError::Internal(msg) => tracing::error!(message = %msg, "CMS internal error"),
            _ => tracing::debug!(error = %self, "CMS error"),
        }
    }
}

impl IntoResponse for CmsError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for CmsError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => CmsError::InvalidInput(err.message().to_string()),
            ErrorKind::Conflict => CmsError::Conflict(err.message().to_string()),
            _ => CmsError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(CmsError::NotFound("Post not found").kind(), ErrorKind::NotFound);
        assert_eq!(CmsError::invalid("Title is required").kind(), ErrorKind::BadRequest);
        assert_eq!(CmsError::Conflict("taken".into()).kind(), ErrorKind::Conflict);
        assert_eq!(
            CmsError::Database(sqlx::Error::RowNotFound).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_not_found_message_is_kept() {
        let app = CmsError::NotFound("Member not found").into_app_error();
        assert_eq!(app.status_code(), 404);
        assert_eq!(app.message(), "Member not found");
    }

    #[test]
    fn test_pool_exhaustion_is_503() {
        let app = CmsError::Database(sqlx::Error::PoolTimedOut).into_app_error();
        assert_eq!(app.status_code(), 503);
    }
}
