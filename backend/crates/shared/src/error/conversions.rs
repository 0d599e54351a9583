//! Error conversions
//!
//! `From` implementations that classify foreign errors into [`AppError`],
//! and the HTTP rendering of `AppError` itself.

use super::app_error::AppError;
use super::kind::ErrorKind;

// ============================================================================
// Standard library / serde_json
// ============================================================================

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::bad_request("Invalid integer format").with_source(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            AppError::bad_request("Invalid JSON body").with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// SQLx (feature-gated)
// ============================================================================

/// Map a store error onto the error taxonomy.
///
/// Unique and foreign-key violations become `Conflict`, a missing row becomes
/// `NotFound`, pool or connection trouble becomes `ServiceUnavailable`, and
/// everything else is `InternalServerError`.
#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::from_sqlx_ref(&err).with_source(err)
    }
}

#[cfg(feature = "sqlx")]
impl AppError {
    /// Classify a borrowed store error. The result carries no source.
    pub fn from_sqlx_ref(err: &sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found"),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::service_unavailable("Database connection pool exhausted")
            }
            // https://www.postgresql.org/docs/current/errcodes-appendix.html
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some("23505") => AppError::conflict("A record with this value already exists")
                    .with_action("Choose a different slug or email"),
                Some("23503") => AppError::conflict("Referenced record does not exist"),
                Some("23502") => AppError::bad_request("Required field is missing"),
                Some("23514") => AppError::bad_request("Check constraint violation"),
                Some("22P02") => AppError::bad_request("Invalid value format"),
                Some("53000" | "53100" | "53200" | "53300") => {
                    AppError::service_unavailable("Database resource exhausted")
                }
                Some("57P01" | "57P02" | "57P03") => {
                    AppError::service_unavailable("Database unavailable")
                }
                _ => AppError::internal("Database error"),
            },
            sqlx::Error::Io(_) => AppError::service_unavailable("Database connection error"),
            _ => AppError::internal("Database error"),
        }
    }
}

// ============================================================================
// Axum (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::bad_request("Invalid JSON body").with_source(rejection)
    }
}

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::PathRejection> for AppError {
    fn from(rejection: axum::extract::rejection::PathRejection) -> Self {
        AppError::bad_request("Invalid path parameter").with_source(rejection)
    }
}

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        AppError::bad_request("Invalid query parameters").with_source(rejection)
    }
}

/// Whether error details may be shown to clients
#[cfg(feature = "axum")]
const EXPOSE_DETAILS: bool = cfg!(debug_assertions);

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.is_server_error() {
            tracing::error!(error = %self, details = ?self.details(), "Request failed");
        }

        // Server errors keep a generic message outside debug builds
        let message = if self.kind() == ErrorKind::InternalServerError && !EXPOSE_DETAILS {
            ErrorKind::InternalServerError.as_str().to_string()
        } else {
            self.message().to_string()
        };

        let mut body = serde_json::json!({
            "error": message,
            "status": self.status_code(),
        });
        if let Some(action) = self.action() {
            body["action"] = serde_json::Value::from(action);
        }
        if EXPOSE_DETAILS {
            if let Some(details) = self.details() {
                body["details"] = serde_json::Value::from(details);
            }
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_error_conversion() {
        let err: AppError = "abc".parse::<i32>().unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: AppError = json_err.into();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_row_not_found_is_404() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.status_code(), 404);
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_response_body_has_error_field() {
        use axum::response::IntoResponse;

        let response = AppError::new(ErrorKind::Forbidden, "Admin access required").into_response();
        assert_eq!(response.status(), 403);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Admin access required");
        assert_eq!(body["status"], 403);
    }
}
