//! Signed Session Tokens
//!
//! HS256 JWTs carrying the account identity, its role and the session id.
//! Verification checks signature and expiry in one step, with zero leeway.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::application::config::AuthConfig;
use crate::domain::entity::{account::Account, auth_session::AuthSession};
use crate::domain::value_object::{AccountId, SessionId, user_role::UserRole};

/// Every verification failure. Callers never learn which check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Invalid token")]
    Invalid,
    #[error("Token signing failed")]
    Signing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: String,
    /// Session id
    pub sid: String,
    pub iat: i64,
    pub exp: i64,
}

/// Identity decoded from a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub account_id: AccountId,
    pub session_id: SessionId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub expires_at: DateTime<Utc>,
}

impl TryFrom<Claims> for VerifiedToken {
    type Error = TokenError;

    fn try_from(claims: Claims) -> Result<Self, TokenError> {
        Ok(Self {
            account_id: claims.sub.parse().map_err(|_| TokenError::Invalid)?,
            session_id: claims.sid.parse().map_err(|_| TokenError::Invalid)?,
            role: UserRole::from_code(&claims.role).ok_or(TokenError::Invalid)?,
            expires_at: DateTime::from_timestamp(claims.exp, 0).ok_or(TokenError::Invalid)?,
            email: claims.email,
            name: claims.name,
        })
    }
}

/// Issues and verifies tokens with the configured secret
#[derive(Clone)]
pub struct TokenService {
    config: Arc<AuthConfig>,
}

impl TokenService {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub fn issue(&self, account: &Account, session: &AuthSession) -> Result<String, TokenError> {
        self.issue_at(account, session, Utc::now())
    }

    /// Issue as if the current time were `issued_at`
    pub fn issue_at(
        &self,
        account: &Account,
        session: &AuthSession,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let iat = issued_at.timestamp();
        let claims = Claims {
            sub: account.account_id.to_string(),
            email: account.email.to_string(),
            name: account.display_name.to_string(),
            role: account.role.code().to_string(),
            sid: session.session_id.to_string(),
            iat,
            exp: iat + self.config.token_ttl_secs(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.config.token_secret),
        )
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            TokenError::Signing
        })
    }

    pub fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.config.token_secret),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            TokenError::Invalid
        })?;

        // jsonwebtoken accepts exp == now; require it to be strictly ahead
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Invalid);
        }

        VerifiedToken::try_from(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{display_name::DisplayName, email::Email};
    use chrono::Duration;
    use platform::client::ClientInfo;
    use platform::crypto::{from_base64_url, to_base64_url};
    use platform::password::HashedPassword;

    fn fixture(role: UserRole) -> (TokenService, Account, AuthSession) {
        let config = Arc::new(AuthConfig::with_random_secret());
        let account = Account::new(
            Email::new("admin@x.com").unwrap(),
            HashedPassword::dummy(),
            DisplayName::new("Admin").unwrap(),
            role,
        );
        let session = AuthSession::new(
            account.account_id,
            config.token_ttl_chrono(),
            &ClientInfo::default(),
        );
        (TokenService::new(config), account, session)
    }

    #[test]
    fn test_issue_then_verify() {
        let (tokens, account, session) = fixture(UserRole::Admin);
        let token = tokens.issue(&account, &session).unwrap();
        let verified = tokens.verify(&token).unwrap();

        assert_eq!(verified.account_id, account.account_id);
        assert_eq!(verified.session_id, session.session_id);
        assert_eq!(verified.role, UserRole::Admin);
        assert_eq!(verified.email, "admin@x.com");
        assert_eq!(verified.name, "Admin");
    }

    #[test]
    fn test_expiry_is_seven_days() {
        let (tokens, account, session) = fixture(UserRole::User);
        let issued_at = Utc::now();
        let token = tokens.issue_at(&account, &session, issued_at).unwrap();
        let verified = tokens.verify(&token).unwrap();
        assert_eq!(
            verified.expires_at.timestamp(),
            issued_at.timestamp() + 7 * 24 * 3600
        );
    }

    #[test]
    fn test_expired_token_rejected() {
        let (tokens, account, session) = fixture(UserRole::Admin);
        let issued_at = Utc::now() - Duration::days(7) - Duration::seconds(1);
        let token = tokens.issue_at(&account, &session, issued_at).unwrap();
        assert_eq!(tokens.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_other_secret_rejected() {
        let (tokens, account, session) = fixture(UserRole::Admin);
        let token = tokens.issue(&account, &session).unwrap();
        let other = TokenService::new(Arc::new(AuthConfig::with_random_secret()));
        assert_eq!(other.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let (tokens, account, session) = fixture(UserRole::User);
        let token = tokens.issue(&account, &session).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        // Promote the role without re-signing
        let payload = String::from_utf8(from_base64_url(parts[1]).unwrap()).unwrap();
        let forged = to_base64_url(payload.replace("\"USER\"", "\"ADMIN\"").as_bytes());
        let forged_token = format!("{}.{}.{}", parts[0], forged, parts[2]);

        assert_eq!(tokens.verify(&forged_token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let (tokens, account, session) = fixture(UserRole::Admin);
        let token = tokens.issue(&account, &session).unwrap();
        let (signed, signature) = token.rsplit_once('.').unwrap();

        let mut chars: Vec<char> = signature.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        let forged: String = chars.into_iter().collect();

        assert_eq!(
            tokens.verify(&format!("{signed}.{forged}")),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn test_garbage_rejected() {
        let (tokens, ..) = fixture(UserRole::Admin);
        for garbage in ["", "abc", "a.b.c", "not a token at all"] {
            assert_eq!(tokens.verify(garbage), Err(TokenError::Invalid));
        }
    }
}
