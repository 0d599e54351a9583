//! Cryptographic Utilities
//!
//! 暗号学的に安全な乱数と、パディングなし URL-safe Base64 の変換。

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};

/// 暗号学的に安全なランダムバイトを生成
///
/// Backed by the OS RNG. The per-process token secret is drawn from here.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// URL-safe Base64（パディングなし）にエンコード
///
/// ```
/// use platform::crypto::{from_base64_url, to_base64_url};
///
/// let encoded = to_base64_url(&[0xfb, 0xff]);
/// assert_eq!(encoded, "-_8");
/// assert_eq!(from_base64_url(&encoded).unwrap(), vec![0xfb, 0xff]);
/// ```
pub fn to_base64_url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// URL-safe Base64（パディングなし）をデコード
pub fn from_base64_url(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::URL_SAFE_NO_PAD.decode(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        assert!(bytes.iter().any(|&b| b != 0));
        assert_ne!(bytes, random_bytes(32));
    }

    #[test]
    fn test_base64_url_has_no_padding() {
        let token = to_base64_url(&random_bytes(48));
        assert_eq!(token.len(), 64);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_eq!(from_base64_url(&token).unwrap().len(), 48);
    }
}
