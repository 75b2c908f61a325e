//! Fast digests for equality checks.
//!
//! These serve exact-match lookups and the link passphrase check, where the
//! client already sends a pre-hashed value. Account passwords use Argon2 in
//! `secretlink-auth` and never pass through here.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Lowercase hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Whether `value` looks like a client-side SHA-256 hash (64 lowercase hex).
pub fn is_client_passphrase_hash(value: &str) -> bool {
    value.len() == 64 && value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Digest persisted for a client-supplied passphrase hash.
pub fn passphrase_digest(client_hash: &str) -> String {
    sha256_hex(client_hash.as_bytes())
}

/// Compare a supplied passphrase hash against the stored digest.
pub fn verify_passphrase(client_hash: &str, stored_digest: &str) -> bool {
    constant_time_eq(
        passphrase_digest(client_hash).as_bytes(),
        stored_digest.as_bytes(),
    )
}

/// Digest of a client IP address for audit rows.
pub fn ip_hash(ip: &str) -> String {
    sha256_hex(ip.as_bytes())
}

/// Constant-time byte comparison. Unequal lengths compare unequal.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }

    #[test]
    fn test_passphrase_roundtrip() {
        let client = sha256_hex(b"hunter2");
        assert!(is_client_passphrase_hash(&client));
        let stored = passphrase_digest(&client);
        assert_ne!(stored, client);
        assert!(verify_passphrase(&client, &stored));
        assert!(!verify_passphrase(&sha256_hex(b"hunter3"), &stored));
        assert!(!verify_passphrase("", &stored));
    }

    #[test]
    fn test_client_hash_shape() {
        assert!(!is_client_passphrase_hash("ABCDEF"));
        assert!(!is_client_passphrase_hash(&"A".repeat(64)));
        assert!(!is_client_passphrase_hash(&"g".repeat(64)));
        assert!(is_client_passphrase_hash(&"0".repeat(64)));
    }
}
