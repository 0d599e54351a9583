//! Check Session Use Case
//!
//! The core of the admin gate: token signature and expiry, then the
//! session row behind it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::AuthSessionRepository;
use crate::domain::value_object::{AccountId, SessionId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Authenticated identity, placed into request extensions by the gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(rename = "id")]
    pub account_id: AccountId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(skip)]
    pub session_id: SessionId,
    #[serde(skip)]
    pub expires_at: DateTime<Utc>,
}

pub struct CheckSessionUseCase<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
    tokens: TokenService,
}

impl<S> CheckSessionUseCase<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            tokens: TokenService::new(config),
        }
    }

    /// Any verification failure, or a session that was revoked or has
    /// expired, is `AuthError::Unauthorized`. Store errors pass through.
    pub async fn execute(&self, token: &str) -> AuthResult<AuthUser> {
        let verified = self
            .tokens
            .verify(token)
            .map_err(|_| AuthError::Unauthorized)?;

        let session = self
            .session_repo
            .find_active(&verified.session_id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(session_id = %verified.session_id, "Token for a revoked or expired session");
                AuthError::Unauthorized
            })?;

        if session.account_id != verified.account_id {
            tracing::warn!(session_id = %session.session_id, "Session does not belong to token subject");
            return Err(AuthError::Unauthorized);
        }

        Ok(AuthUser {
            account_id: verified.account_id,
            email: verified.email,
            name: verified.name,
            role: verified.role,
            session_id: verified.session_id,
            expires_at: verified.expires_at.min(session.expires_at),
        })
    }

    /// Like `execute`, additionally requiring `role`
    pub async fn require(&self, token: &str, role: UserRole) -> AuthResult<AuthUser> {
        let user = self.execute(token).await?;
        if !user.role.satisfies(role) {
            return Err(AuthError::Forbidden);
        }
        Ok(user)
    }
}
