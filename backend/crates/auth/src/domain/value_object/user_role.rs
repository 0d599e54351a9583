use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role. Stored and transmitted as its upper-case code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }

    #[inline]
    const fn rank(&self) -> u8 {
        match self {
            UserRole::User => 0,
            UserRole::Admin => 1,
        }
    }

    /// Whether this role may access routes requiring `required`
    #[inline]
    pub const fn satisfies(&self, required: UserRole) -> bool {
        self.rank() >= required.rank()
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Unknown codes yield `None`; callers decide whether that is an
    /// integrity error (stored rows) or an invalid token (claims).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "USER" => Some(UserRole::User),
            "ADMIN" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("USER"), Some(UserRole::User));
        assert_eq!(UserRole::from_code("ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_code("admin"), None);
        assert_eq!(UserRole::from_code("SUPERUSER"), None);
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::User.to_string(), "USER");
        assert_eq!(UserRole::Admin.to_string(), "ADMIN");
    }

    #[test]
    fn test_user_role_serde() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");
        let role: UserRole = serde_json::from_str("\"USER\"").unwrap();
        assert_eq!(role, UserRole::User);
    }

    #[test]
    fn test_user_role_satisfies() {
        assert!(UserRole::Admin.satisfies(UserRole::Admin));
        assert!(UserRole::Admin.satisfies(UserRole::User));
        assert!(UserRole::User.satisfies(UserRole::User));
        assert!(!UserRole::User.satisfies(UserRole::Admin));
    }
}
