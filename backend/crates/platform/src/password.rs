//! Password Hashing and Verification
//!
//! - Argon2id hashing with fixed OWASP parameters and a random salt
//! - Optional application pepper
//! - Zeroization of clear text on drop
//!
//! Policy checks (length, control characters, common patterns) run only when
//! a password is *chosen*. Passwords presented at login are normalised the
//! same way but never rejected by policy, so an account created before a
//! policy change can still sign in.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Constants
// ============================================================================

/// パスワードの最小文字数
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// パスワードの最大文字数
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Well-formed Argon2id hash that no password produces in practice.
/// Verified against when an account does not exist.
const DUMMY_PHC: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

// ============================================================================
// Error Types
// ============================================================================

/// パスワードポリシー違反エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, zeroized when dropped.
///
/// Not `Clone`, and `Debug` output is redacted.
///
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let chosen = ClearTextPassword::new("correct horse battery".to_string()).unwrap();
/// let hashed = chosen.hash(None).unwrap();
///
/// let presented = ClearTextPassword::for_verification("correct horse battery".to_string());
/// assert!(hashed.verify(&presented, None));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Accept a newly chosen password.
    ///
    /// Unicode is NFKC-normalised, then checked: not blank, 8 to 128 code
    /// points, no control characters except space, tab and newline, and not
    /// a well-known weak password.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self::for_verification(raw);
        password.check_policy()?;
        Ok(password)
    }

    /// Wrap a password presented for verification. No policy is applied.
    pub fn for_verification(raw: String) -> Self {
        let raw = Zeroizing::new(raw);
        Self(raw.nfkc().collect())
    }

    /// Run the policy checks without consuming the password
    pub fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        let normalized = self.0.as_str();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        if is_common_pattern(normalized) {
            return Err(PasswordPolicyError::CommonPattern);
        }

        Ok(())
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = self.0.as_bytes().to_vec();
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        Zeroizing::new(bytes)
    }

    /// Hash with Argon2id (m=19 MiB, t=2, p=1) and a random 128-bit salt.
    ///
    /// CPU-bound: async callers should run this on a blocking thread.
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(OsRng);

        let hash = Argon2::default()
            .hash_password(&self.peppered(pepper), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2id hash in PHC string format (algorithm, version, parameters, salt
/// and digest in one string).
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Parse a PHC string read from storage
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    /// Hash used when the account being checked does not exist
    pub fn dummy() -> Self {
        Self {
            hash: DUMMY_PHC.to_string(),
        }
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify with argon2's constant-time comparison. A hash that fails to
    /// parse verifies as `false`.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(&password.peppered(pepper), &parsed_hash)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn is_common_pattern(password: &str) -> bool {
    let lower = password.to_lowercase();

    // "aaaaaaaa"
    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            return true;
        }
    }

    if is_sequential_numbers(&lower) {
        return true;
    }

    const KEYBOARD_PATTERNS: &[&str] = &["qwerty", "asdfgh", "zxcvbn", "qazwsx", "1qaz2wsx"];
    if KEYBOARD_PATTERNS.iter().any(|p| lower.contains(p)) {
        return true;
    }

    const COMMON_PASSWORDS: &[&str] = &[
        "password",
        "password1",
        "password123",
        "abcdefgh",
        "letmein1",
        "welcome1",
        "admin123",
        "administrator",
        "iloveyou",
        "sunshine",
        "princess",
        "football",
        "baseball",
        "trustno1",
        "changeme",
    ];

    COMMON_PASSWORDS.contains(&lower.as_str())
}

/// All digits, strictly ascending or descending ("12345678", "98765432")
fn is_sequential_numbers(s: &str) -> bool {
    let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() < 4 || digits.len() != s.chars().count() {
        return false;
    }

    let ascending = digits
        .windows(2)
        .all(|w| w[1] == w[0] + 1 || (w[0] == 9 && w[1] == 0));
    let descending = digits
        .windows(2)
        .all(|w| w[0] == w[1] + 1 || (w[0] == 0 && w[1] == 9));

    ascending || descending
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn login(raw: &str) -> ClearTextPassword {
        ClearTextPassword::for_verification(raw.to_string())
    }

    #[test]
    fn test_password_too_short() {
        let result = ClearTextPassword::new("short".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::TooShort { .. })));
    }

    #[test]
    fn test_password_too_long() {
        let result = ClearTextPassword::new("ab".repeat(MAX_PASSWORD_LENGTH));
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_whitespace_only() {
        let result = ClearTextPassword::new("        ".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
    }

    #[test]
    fn test_password_control_character() {
        let result = ClearTextPassword::new("good\u{0007}password".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::InvalidCharacter)));
    }

    #[test]
    fn test_password_common_pattern() {
        for weak in ["password123", "qwertyuiop", "12345678", "zzzzzzzz", "admin123"] {
            let result = ClearTextPassword::new(weak.to_string());
            assert!(
                matches!(result, Err(PasswordPolicyError::CommonPattern)),
                "{weak} should be rejected"
            );
        }
    }

    #[test]
    fn test_valid_passwords() {
        assert!(ClearTextPassword::new("MySecure#Pass2024!".to_string()).is_ok());
        assert!(ClearTextPassword::new("パスワード安全です!".to_string()).is_ok());
    }

    #[test]
    fn test_verification_skips_policy() {
        let weak = login("admin123");
        assert!(weak.check_policy().is_err());
        let hashed = weak.hash(None).unwrap();
        assert!(hashed.verify(&login("admin123"), None));
    }

    #[test]
    fn test_nfkc_normalisation_matches() {
        // Fullwidth letters normalise to ASCII
        let hashed = login("Ｐａｓｓｗｏｒｄ９").hash(None).unwrap();
        assert!(hashed.verify(&login("Password9"), None));
    }

    #[test]
    fn test_hash_and_verify() {
        let password = login("TestPassword123!");
        let hashed = password.hash(None).unwrap();

        assert!(hashed.verify(&password, None));
        assert!(!hashed.verify(&login("WrongPassword123!"), None));
    }

    #[test]
    fn test_hash_is_salted() {
        let a = login("SamePassword!1").hash(None).unwrap();
        let b = login("SamePassword!1").hash(None).unwrap();
        assert_ne!(a.as_phc_string(), b.as_phc_string());
        assert!(a.as_phc_string().starts_with("$argon2id$"));
    }

    #[test]
    fn test_hash_with_pepper() {
        let password = login("TestPassword123!");
        let pepper = b"my_secret_pepper";
        let hashed = password.hash(Some(pepper)).unwrap();

        assert!(hashed.verify(&password, Some(pepper)));
        assert!(!hashed.verify(&password, None));
        assert!(!hashed.verify(&password, Some(b"wrong_pepper")));
    }

    #[test]
    fn test_phc_string_restored_from_storage() {
        let password = login("TestPassword123!");
        let phc = password.hash(None).unwrap().as_phc_string().to_string();
        let restored = HashedPassword::from_phc_string(phc).unwrap();
        assert!(restored.verify(&password, None));
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(HashedPassword::from_phc_string("not_a_valid_hash").is_err());
    }

    #[test]
    fn test_dummy_hash_parses_and_rejects() {
        let dummy = HashedPassword::dummy();
        assert!(HashedPassword::from_phc_string(dummy.as_phc_string()).is_ok());
        assert!(!dummy.verify(&login("anything at all"), None));
        assert!(!dummy.verify(&login(""), None));
    }

    #[test]
    fn test_debug_redaction() {
        let debug_output = format!("{:?}", login("secret"));
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));
    }
}
