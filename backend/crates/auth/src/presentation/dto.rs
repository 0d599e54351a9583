//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::check_session::AuthUser;
use crate::domain::entity::account::Account;
use crate::domain::value_object::{AccountId, user_role::UserRole};

/// Account as returned to clients. Never includes the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: AccountId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

impl From<&Account> for UserDto {
    fn from(account: &Account) -> Self {
        Self {
            id: account.account_id,
            email: account.email.to_string(),
            name: account.display_name.to_string(),
            role: account.role,
        }
    }
}

impl From<&AuthUser> for UserDto {
    fn from(user: &AuthUser) -> Self {
        Self {
            id: user.account_id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// Fields are optional so that a missing one is a 400 with a clear
/// message rather than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserDto,
    pub token: String,
}

// ============================================================================
// Logout
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub const OK: Self = Self { success: true };
}

// ============================================================================
// Sign Up
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignUpResponse {
    pub success: bool,
    pub user: UserDto,
}

// ============================================================================
// Current user
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: UserDto,
    pub expires_at: DateTime<Utc>,
}

// ============================================================================
// Change password
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_tolerates_missing_fields() {
        let req: LoginRequest = serde_json::from_str(r#"{"email":"a@b.co"}"#).unwrap();
        assert_eq!(req.email.as_deref(), Some("a@b.co"));
        assert!(req.password.is_none());
    }

    #[test]
    fn test_change_password_request_is_camel_case() {
        let req: ChangePasswordRequest =
            serde_json::from_str(r#"{"currentPassword":"a","newPassword":"b"}"#).unwrap();
        assert_eq!(req.current_password, "a");
        assert_eq!(req.new_password, "b");
    }

    #[test]
    fn test_me_response_shape() {
        let response = MeResponse {
            user: UserDto {
                id: AccountId::new(),
                email: "admin@x.com".into(),
                name: "Admin".into(),
                role: UserRole::Admin,
            },
            expires_at: Utc::now(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["user"]["role"], "ADMIN");
        assert!(json["expiresAt"].is_string());
        assert!(json["user"].get("passwordHash").is_none());
    }
}
