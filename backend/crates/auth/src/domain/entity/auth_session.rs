//! Auth Session Entity
//!
//! Server-side record of one login. The token carries the session id in
//! its `sid` claim; deleting the row revokes the token.

use chrono::{DateTime, Duration, Utc};
use platform::client::ClientInfo;

use crate::domain::value_object::{AccountId, SessionId};

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session_id: SessionId,
    pub account_id: AccountId,
    pub expires_at: DateTime<Utc>,
    /// Recorded for auditing only
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuthSession {
    /// Fixed window starting at `now`; sessions are never extended
    pub fn new(account_id: AccountId, ttl: Duration, client: &ClientInfo) -> Self {
        let now = Utc::now();
        Self {
            session_id: SessionId::new(),
            account_id,
            expires_at: now + ttl,
            client_ip: client.ip_string(),
            user_agent: client.user_agent.clone(),
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_window() {
        let session = AuthSession::new(AccountId::new(), Duration::days(7), &ClientInfo::default());
        assert!(!session.is_expired());
        assert!(session.is_expired_at(session.expires_at));
        assert!(session.is_expired_at(session.created_at + Duration::days(8)));
        assert_eq!(session.expires_at - session.created_at, Duration::days(7));
    }
}
