//! In-memory repository
//!
//! Same contracts as the PostgreSQL repository, kept in process memory.
//! Used by tests and local tooling that has no database.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use platform::password::HashedPassword;
use tokio::sync::RwLock;

use crate::domain::entity::{account::Account, auth_session::AuthSession};
use crate::domain::repository::{AccountRepository, AuthSessionRepository};
use crate::domain::value_object::{AccountId, SessionId, email::Email};
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
    sessions: Arc<RwLock<HashMap<SessionId, AuthSession>>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, expired ones included
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Overwrite a stored session (tests use this to age sessions)
    pub async fn put_session(&self, session: AuthSession) {
        self.sessions.write().await.insert(session.session_id, session);
    }
}

impl AccountRepository for MemoryAuthRepository {
    async fn create(&self, account: &Account) -> AuthResult<()> {
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email == account.email) {
            return Err(AuthError::EmailTaken);
        }
        accounts.insert(account.account_id, account.clone());
        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>> {
        Ok(self.accounts.read().await.get(account_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| &a.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.accounts.read().await.values().any(|a| &a.email == email))
    }

    async fn update_password(
        &self,
        account_id: &AccountId,
        password_hash: &HashedPassword,
    ) -> AuthResult<()> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(account_id).ok_or(AuthError::Unauthorized)?;
        account.change_password(password_hash.clone());
        Ok(())
    }
}

impl AuthSessionRepository for MemoryAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        self.sessions
            .write()
            .await
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_active(&self, session_id: &SessionId) -> AuthResult<Option<AuthSession>> {
        let now = Utc::now();
        Ok(self
            .sessions
            .read()
            .await
            .get(session_id)
            .filter(|s| !s.is_expired_at(now))
            .cloned())
    }

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        Ok((before - sessions.len()) as u64)
    }
}
