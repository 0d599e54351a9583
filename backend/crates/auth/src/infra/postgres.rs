//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{account::Account, auth_session::AuthSession};
use crate::domain::repository::{AccountRepository, AuthSessionRepository};
use crate::domain::value_object::{
    AccountId, SessionId, display_name::DisplayName, email::Email, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgAuthRepository {
    async fn create(&self, account: &Account) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                email,
                password_hash,
                display_name,
                role,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.display_name.as_str())
        .bind(account.role.code())
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::EmailTaken,
            _ => AuthError::Database(e),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                password_hash,
                display_name,
                role,
                created_at,
                updated_at
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                password_hash,
                display_name,
                role,
                created_at,
                updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update_password(
        &self,
        account_id: &AccountId,
        password_hash: &HashedPassword,
    ) -> AuthResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE accounts SET
                password_hash = $2,
                updated_at = now()
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(password_hash.as_phc_string())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(AuthError::Unauthorized);
        }

        Ok(())
    }
}

// ============================================================================
// Auth Session Repository Implementation
// ============================================================================

impl AuthSessionRepository for PgAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                account_id,
                expires_at,
                client_ip,
                user_agent,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.account_id.as_uuid())
        .bind(session.expires_at)
        .bind(session.client_ip.as_deref())
        .bind(session.user_agent.as_deref())
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_active(&self, session_id: &SessionId) -> AuthResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT
                session_id,
                account_id,
                expires_at,
                client_ip,
                user_agent,
                created_at
            FROM auth_sessions
            WHERE session_id = $1 AND expires_at > now()
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuthSessionRow::into_session))
    }

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at <= now()")
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    email: String,
    password_hash: String,
    display_name: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AuthResult<Account> {
        let role = UserRole::from_code(&self.role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role in accounts: {}", self.role)))?;

        let password_hash = HashedPassword::from_phc_string(self.password_hash).map_err(|e| {
            AuthError::Internal(format!("Invalid password hash for {}: {}", self.account_id, e))
        })?;

        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            email: Email::from_db(self.email),
            password_hash,
            display_name: DisplayName::from_db(self.display_name),
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuthSessionRow {
    session_id: Uuid,
    account_id: Uuid,
    expires_at: DateTime<Utc>,
    client_ip: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
}

impl AuthSessionRow {
    fn into_session(self) -> AuthSession {
        AuthSession {
            session_id: SessionId::from_uuid(self.session_id),
            account_id: AccountId::from_uuid(self.account_id),
            expires_at: self.expires_at,
            client_ip: self.client_ip,
            user_agent: self.user_agent,
            created_at: self.created_at,
        }
    }
}
