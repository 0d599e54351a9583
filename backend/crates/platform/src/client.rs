//! Client identification utilities
//!
//! Who is on the other end of a request, as far as headers can tell.
//! Recorded on sessions for auditing only.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Longest user agent kept on a session row
const MAX_USER_AGENT_LEN: usize = 512;

/// Client metadata captured at login
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip: Option<IpAddr>,
    pub user_agent: Option<String>,
}

impl ClientInfo {
    pub fn from_headers(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Self {
        Self {
            ip: extract_client_ip(headers, direct_ip),
            user_agent: extract_user_agent(headers),
        }
    }

    /// IP as string (for database storage)
    pub fn ip_string(&self) -> Option<String> {
        self.ip.map(|ip| ip.to_string())
    }
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For first (reverse proxy setups), then X-Real-IP,
/// then falls back to the direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    let from_header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|ip| ip.trim().parse::<IpAddr>().ok())
    };

    from_header("x-forwarded-for")
        .or_else(|| from_header("x-real-ip"))
        .or(direct_ip)
}

/// User-Agent header, truncated to a storable length
pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    let ua = headers.get(header::USER_AGENT)?.to_str().ok()?.trim();
    if ua.is_empty() {
        return None;
    }
    Some(ua.chars().take(MAX_USER_AGENT_LEN).collect())
}
