//! Sign In Use Case
//!
//! Authenticates an account by email and password, persists a session and
//! issues a token for it.

use std::sync::Arc;

use platform::client::ClientInfo;
use platform::password::{ClearTextPassword, HashedPassword};

use crate::application::config::AuthConfig;
use crate::application::password::verify_password;
use crate::application::token::TokenService;
use crate::domain::entity::{account::Account, auth_session::AuthSession};
use crate::domain::repository::{AccountRepository, AuthSessionRepository};
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

pub struct SignInInput {
    pub email: String,
    pub password: String,
}

pub struct SignInOutput {
    pub account: Account,
    pub session: AuthSession,
    pub token: String,
}

pub struct SignInUseCase<A, S>
where
    A: AccountRepository,
    S: AuthSessionRepository,
{
    account_repo: Arc<A>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
    required_role: Option<UserRole>,
}

impl<A, S> SignInUseCase<A, S>
where
    A: AccountRepository,
    S: AuthSessionRepository,
{
    pub fn new(account_repo: Arc<A>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            account_repo,
            session_repo,
            config,
            required_role: None,
        }
    }

    /// Only accounts whose role satisfies `role` may sign in. Others get
    /// the same `InvalidCredentials` as a wrong password.
    pub fn require_role(mut self, role: UserRole) -> Self {
        self.required_role = Some(role);
        self
    }

    pub async fn execute(&self, input: SignInInput, client: ClientInfo) -> AuthResult<SignInOutput> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        // A malformed email cannot belong to an account; treat it as unknown
        let account = match Email::new(&input.email) {
            Ok(email) => self.account_repo.find_by_email(&email).await?,
            Err(_) => None,
        };

        // Unknown accounts still pay for one Argon2 verification
        let hash = account
            .as_ref()
            .map(|a| a.password_hash.clone())
            .unwrap_or_else(HashedPassword::dummy);
        let password = ClearTextPassword::for_verification(input.password);
        let password_valid = verify_password(&self.config, hash, password).await?;

        let account = match account {
            Some(account) if password_valid => account,
            _ => return Err(AuthError::InvalidCredentials),
        };

        if let Some(required) = self.required_role {
            if !account.role.satisfies(required) {
                return Err(AuthError::InvalidCredentials);
            }
        }

        let session = AuthSession::new(account.account_id, self.config.token_ttl_chrono(), &client);
        self.session_repo.create(&session).await?;

        let token = TokenService::new(self.config.clone())
            .issue(&account, &session)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(
            account_id = %account.account_id,
            session_id = %session.session_id,
            role = %account.role,
            client_ip = ?session.client_ip,
            "Account signed in"
        );

        Ok(SignInOutput {
            account,
            session,
            token,
        })
    }
}
