//! Request extractors

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{HeaderMap, header, request::Parts};
use platform::client::ClientInfo;

use crate::application::check_session::AuthUser;
use crate::error::AuthError;

/// Client IP and user agent. Works with or without `ConnectInfo`.
#[derive(Debug, Clone)]
pub struct ClientContext(pub ClientInfo);

impl<S> FromRequestParts<S> for ClientContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let direct_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip());
        Ok(Self(ClientInfo::from_headers(&parts.headers, direct_ip)))
    }
}

/// Identity placed by the gate. Using it on an ungated route is a 401.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AuthError::Unauthorized)
    }
}

/// Token from the auth cookie, else from `Authorization: Bearer`
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    platform::cookie::extract_cookie(headers, cookie_name).or_else(|| {
        headers
            .get(header::AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_cookie_preferred_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("auth-token=from-cookie"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(
            extract_token(&headers, "auth-token").as_deref(),
            Some("from-cookie")
        );
    }

    #[test]
    fn test_bearer_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(
            extract_token(&headers, "auth-token").as_deref(),
            Some("abc.def.ghi")
        );

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(extract_token(&headers, "auth-token"), None);
    }
}
