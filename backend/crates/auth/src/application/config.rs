//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::config::{self as env, ConfigError};
use platform::cookie::CookieConfig;
use zeroize::Zeroizing;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Shortest accepted signing secret, in bytes
pub const MIN_TOKEN_SECRET_LEN: usize = 32;

/// Token and session lifetime
pub const TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 3600);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Cookie carrying the token
    pub cookie_name: String,
    /// HS256 signing secret
    pub token_secret: Zeroizing<Vec<u8>>,
    /// Token and session lifetime (fixed window, no renewal)
    pub token_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Zeroizing<Vec<u8>>>,
}

impl AuthConfig {
    /// Config with an explicit secret. Rejects secrets shorter than 32 bytes.
    pub fn with_secret(secret: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let secret = Zeroizing::new(secret.into());
        if secret.len() < MIN_TOKEN_SECRET_LEN {
            return Err(ConfigError::Invalid {
                key: "AUTH_TOKEN_SECRET",
                reason: format!("must be at least {MIN_TOKEN_SECRET_LEN} bytes"),
            });
        }
        Ok(Self {
            cookie_name: "auth-token".to_string(),
            token_secret: secret,
            token_ttl: TOKEN_TTL,
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            password_pepper: None,
        })
    }

    /// Config with a random per-process secret. Tokens do not survive a restart.
    pub fn with_random_secret() -> Self {
        let secret = platform::crypto::random_bytes(MIN_TOKEN_SECRET_LEN * 2);
        Self {
            cookie_name: "auth-token".to_string(),
            token_secret: Zeroizing::new(secret),
            token_ttl: TOKEN_TTL,
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            password_pepper: None,
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Load from the environment.
    ///
    /// `AUTH_TOKEN_SECRET` is required in release builds. Debug builds fall
    /// back to a random secret and say so in the log.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env::optional("AUTH_TOKEN_SECRET") {
            Some(secret) => Self::with_secret(secret.into_bytes())?,
            None if cfg!(debug_assertions) => {
                tracing::warn!(
                    "AUTH_TOKEN_SECRET is not set, using a random secret; tokens will not survive a restart"
                );
                Self::with_random_secret()
            }
            None => return Err(ConfigError::Missing("AUTH_TOKEN_SECRET")),
        };

        config.cookie_name = env::or_default("AUTH_COOKIE_NAME", "auth-token");
        config.cookie_secure = env::flag("AUTH_COOKIE_SECURE", true)?;
        config.password_pepper =
            env::optional("AUTH_PASSWORD_PEPPER").map(|p| Zeroizing::new(p.into_bytes()));

        if !config.cookie_secure && !cfg!(debug_assertions) {
            tracing::warn!("AUTH_COOKIE_SECURE is off in a release build");
        }

        Ok(config)
    }

    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }

    pub fn token_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.token_ttl_secs())
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref().map(Vec::as_slice)
    }

    /// Cookie attributes for the token cookie
    pub fn cookie(&self) -> CookieConfig {
        CookieConfig {
            same_site: self.cookie_same_site,
            ..CookieConfig::session(&self.cookie_name, self.cookie_secure, self.token_ttl_secs())
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("cookie_name", &self.cookie_name)
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
