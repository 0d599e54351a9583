//! Sign Out Use Case
//!
//! Revokes the session behind a token. Never fails: a missing, invalid or
//! already revoked token is simply nothing to do.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::AuthSessionRepository;

pub struct SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, token: Option<&str>) {
        let Some(token) = token else {
            return;
        };
        let Ok(verified) = TokenService::new(self.config.clone()).verify(token) else {
            tracing::debug!("Sign out with an invalid token, nothing to revoke");
            return;
        };

        match self.session_repo.delete(&verified.session_id).await {
            Ok(()) => tracing::info!(
                account_id = %verified.account_id,
                session_id = %verified.session_id,
                "Account signed out"
            ),
            Err(e) => tracing::warn!(
                error = %e,
                session_id = %verified.session_id,
                "Failed to delete session on sign out"
            ),
        }
    }
}
