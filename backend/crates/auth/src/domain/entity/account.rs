//! Account Entity
//!
//! A person who can sign in. Created by sign-up or startup seeding and
//! never deleted; only the password changes after creation.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{
    AccountId, display_name::DisplayName, email::Email, user_role::UserRole,
};

#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: AccountId,
    /// Unique, stored lower-cased
    pub email: Email,
    pub password_hash: HashedPassword,
    pub display_name: DisplayName,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        email: Email,
        password_hash: HashedPassword,
        display_name: DisplayName,
        role: UserRole,
    ) -> Self {
        let now = Utc::now();
        Self {
            account_id: AccountId::new(),
            email,
            password_hash,
            display_name,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn change_password(&mut self, password_hash: HashedPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}
