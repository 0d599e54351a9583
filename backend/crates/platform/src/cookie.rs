//! Cookie Management Infrastructure
//!
//! Building `Set-Cookie` values and reading cookies back from requests.

use axum::http::{HeaderMap, HeaderValue, header};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    #[default]
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age_secs: Option<i64>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "auth-token".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Strict,
            path: "/".to_string(),
            max_age_secs: None,
        }
    }
}

impl CookieConfig {
    /// `HttpOnly; SameSite=Strict; Path=/` cookie that lives for `max_age_secs`
    pub fn session(name: impl Into<String>, secure: bool, max_age_secs: i64) -> Self {
        Self {
            name: name.into(),
            secure,
            max_age_secs: Some(max_age_secs),
            ..Self::default()
        }
    }

    fn attributes(&self) -> String {
        let mut attrs = String::new();
        if self.http_only {
            attrs.push_str("; HttpOnly");
        }
        if self.secure {
            attrs.push_str("; Secure");
        }
        attrs.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        attrs.push_str(&format!("; Path={}", self.path));
        attrs
    }

    /// Build Set-Cookie header value
    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut cookie = format!("{}={}{}", self.name, value, self.attributes());
        if let Some(max_age) = self.max_age_secs {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }
        cookie
    }

    /// Build a Set-Cookie value that clears the cookie.
    /// Carries the same attributes so browsers match the original cookie.
    pub fn build_delete_cookie(&self) -> String {
        format!("{}={}; Max-Age=0", self.name, self.attributes())
    }
}

/// Extract a cookie value from headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

/// Create a Set-Cookie header value
pub fn set_cookie_header(config: &CookieConfig, value: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&config.build_set_cookie(value)).ok()
}

/// Create a clearing Set-Cookie header value
pub fn delete_cookie_header(config: &CookieConfig) -> Option<HeaderValue> {
    HeaderValue::from_str(&config.build_delete_cookie()).ok()
}
