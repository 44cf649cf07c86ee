//! Document identifier utilities
//!
//! Identifiers follow the document store's 24-character hex surface:
//! a 4-byte big-endian unix-timestamp prefix followed by 8 random bytes,
//! rendered as lowercase hex.

use chrono::Utc;
use rand::RngCore;

/// Length of a rendered identifier in hex characters
pub const OBJECT_ID_LEN: usize = 24;

/// Generate a new document identifier
pub fn generate() -> String {
    let timestamp = Utc::now().timestamp() as u32;

    let mut bytes = [0u8; 12];
    bytes[..4].copy_from_slice(&timestamp.to_be_bytes());
    rand::thread_rng().fill_bytes(&mut bytes[4..]);

    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Check whether a string is a well-formed document identifier
///
/// Accepts exactly 24 hex characters, either case.
pub fn is_valid(id: &str) -> bool {
    id.len() == OBJECT_ID_LEN && id.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_valid() {
        let id = generate();
        assert_eq!(id.len(), OBJECT_ID_LEN);
        assert!(is_valid(&id));
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = generate();
        let b = generate();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!is_valid(""));
        assert!(!is_valid("abc123"));
        assert!(!is_valid("0123456789abcdef0123456789abcdef"));
    }

    #[test]
    fn rejects_non_hex_characters() {
        assert!(!is_valid("zzzzzzzzzzzzzzzzzzzzzzzz"));
        assert!(!is_valid("0123456789abcdef0123456g"));
    }

    #[test]
    fn accepts_uppercase_hex() {
        assert!(is_valid("0123456789ABCDEF01234567"));
    }
}
