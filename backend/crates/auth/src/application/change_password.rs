//! Change Password Use Case

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::password::{hash_password, verify_password};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::AccountId;
use crate::error::{AuthError, AuthResult};

pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<A> ChangePasswordUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            account_repo,
            config,
        }
    }

    pub async fn execute(&self, account_id: &AccountId, input: ChangePasswordInput) -> AuthResult<()> {
        let mut account = self
            .account_repo
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let current = ClearTextPassword::for_verification(input.current_password);
        if !verify_password(&self.config, account.password_hash.clone(), current).await? {
            return Err(AuthError::WrongCurrentPassword);
        }

        let new_password = ClearTextPassword::new(input.new_password)?;
        account.change_password(hash_password(&self.config, new_password).await?);

        self.account_repo
            .update_password(&account.account_id, &account.password_hash)
            .await?;

        tracing::info!(account_id = %account.account_id, "Password changed");

        Ok(())
    }
}
