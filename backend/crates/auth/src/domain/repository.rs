//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the infra layer.

use crate::domain::entity::{account::Account, auth_session::AuthSession};
use crate::domain::value_object::{AccountId, SessionId, email::Email};
use crate::error::AuthResult;
use platform::password::HashedPassword;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert a new account. A taken email is `AuthError::EmailTaken`.
    async fn create(&self, account: &Account) -> AuthResult<()>;

    async fn find_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    async fn update_password(
        &self,
        account_id: &AccountId,
        password_hash: &HashedPassword,
    ) -> AuthResult<()>;
}

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Session that exists and has not expired
    async fn find_active(&self, session_id: &SessionId) -> AuthResult<Option<AuthSession>>;

    /// Deleting an unknown session is not an error
    async fn delete(&self, session_id: &SessionId) -> AuthResult<()>;

    /// Remove expired sessions, returning how many were deleted
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}

/// Everything the auth handlers and the gate need from storage
pub trait AuthStore:
    AccountRepository + AuthSessionRepository + Clone + Send + Sync + 'static
{
}

impl<T> AuthStore for T where
    T: AccountRepository + AuthSessionRepository + Clone + Send + Sync + 'static
{
}
