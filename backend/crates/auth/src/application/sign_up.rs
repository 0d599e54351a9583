//! Sign Up Use Case
//!
//! Creates a `USER` account.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::password::hash_password;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{display_name::DisplayName, email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub name: String,
}

pub struct SignUpUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<A> SignUpUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            account_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<Account> {
        let email = Email::new(input.email)?;
        let display_name = DisplayName::new(input.name)?;
        let password = ClearTextPassword::new(input.password)?;

        if self.account_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(&self.config, password).await?;
        let account = Account::new(email, password_hash, display_name, UserRole::User);

        // Concurrent sign-ups for the same email are settled by the unique index
        self.account_repo.create(&account).await?;

        tracing::info!(account_id = %account.account_id, "Account created");

        Ok(account)
    }
}
