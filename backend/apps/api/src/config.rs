//! Server configuration
//!
//! Everything the binary itself needs from the environment. Auth settings
//! are loaded separately by `auth::AuthConfig::from_env`.

use std::net::SocketAddr;

use platform::config::{self as env, ConfigError};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: [&str; 2] = ["http://localhost:40922", "http://127.0.0.1:40922"];

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub seed_admin: Option<SeedAdmin>,
}

/// Admin account created at startup when absent
#[derive(Clone)]
pub struct SeedAdmin {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl std::fmt::Debug for SeedAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedAdmin")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut frontend_origins = env::list("FRONTEND_ORIGINS");
        if frontend_origins.is_empty() {
            frontend_origins = DEFAULT_FRONTEND_ORIGINS.map(String::from).to_vec();
        }

        Ok(Self {
            database_url: env::required("DATABASE_URL")?,
            max_connections: env::parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            bind_addr: env::parse_or("BIND_ADDR", default_bind_addr())?,
            frontend_origins,
            seed_admin: seed_admin()?,
        })
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 31113))
}

/// Both email and password, or neither
fn seed_admin() -> Result<Option<SeedAdmin>, ConfigError> {
    match (env::optional("SEED_ADMIN_EMAIL"), env::optional("SEED_ADMIN_PASSWORD")) {
        (Some(email), Some(password)) => Ok(Some(SeedAdmin {
            email,
            password,
            name: env::or_default("SEED_ADMIN_NAME", "Admin"),
        })),
        (None, None) => Ok(None),
        (Some(_), None) => Err(ConfigError::Missing("SEED_ADMIN_PASSWORD")),
        (None, Some(_)) => Err(ConfigError::Missing("SEED_ADMIN_EMAIL")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_addr() {
        assert_eq!(default_bind_addr().to_string(), "0.0.0.0:31113");
    }

    #[test]
    fn test_seed_admin_debug_hides_password() {
        let seed = SeedAdmin {
            email: "admin@x.com".into(),
            password: "admin123".into(),
            name: "Admin".into(),
        };
        let debug = format!("{seed:?}");
        assert!(debug.contains("admin@x.com"));
        assert!(!debug.contains("admin123"));
    }
}
