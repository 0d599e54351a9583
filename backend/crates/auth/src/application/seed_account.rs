//! Seed Account Use Case
//!
//! Startup provisioning of an account (typically the first admin) from
//! configuration. Idempotent: an existing account is left untouched.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::password::hash_password;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{display_name::DisplayName, email::Email, user_role::UserRole};
use crate::error::AuthResult;

pub struct SeedAccountInput {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: UserRole,
}

pub struct SeedAccountUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<A> SeedAccountUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            account_repo,
            config,
        }
    }

    /// Returns `true` when the account was created
    pub async fn execute(&self, input: SeedAccountInput) -> AuthResult<bool> {
        let email = Email::new(input.email)?;
        let display_name = DisplayName::new(input.name)?;

        if self.account_repo.exists_by_email(&email).await? {
            tracing::debug!(email = %email, "Seed account already exists");
            return Ok(false);
        }

        // Operators choose this password; a weak one is reported, not refused
        let password = ClearTextPassword::for_verification(input.password);
        if let Err(e) = password.check_policy() {
            tracing::warn!(email = %email, reason = %e, "Seed account password is weak, change it after first login");
        }

        let password_hash = hash_password(&self.config, password).await?;
        let account = Account::new(email, password_hash, display_name, input.role);
        self.account_repo.create(&account).await?;

        tracing::info!(
            account_id = %account.account_id,
            role = %account.role,
            "Seed account created"
        );

        Ok(true)
    }
}
