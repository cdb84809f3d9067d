//! Password digests
//!
//! New records store `sha256$<salt-hex>$<digest-hex>` where the digest is
//! SHA-256 over salt bytes followed by the password. A stored value in any
//! other form never verifies.

use rand::RngCore;
use sha2::{Digest, Sha256};

const SCHEME: &str = "sha256";
const SALT_LEN: usize = 16;

/// Produce the stored form of `password` with a fresh random salt
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    format!("{}${}${}", SCHEME, to_hex(&salt), digest(&salt, password))
}

/// Check a supplied password against its stored form
pub fn verify_password(stored: &str, supplied: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(SCHEME), Some(salt_hex), Some(expected)) => match from_hex(salt_hex) {
            Some(salt) => constant_time_eq(digest(&salt, supplied).as_bytes(), expected.as_bytes()),
            None => false,
        },
        _ => false,
    }
}

fn digest(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn from_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| hex.get(i..i + 2).and_then(|pair| u8::from_str_radix(pair, 16).ok()))
        .collect()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let stored = hash_password("Str0ng!pw");
        assert!(stored.starts_with("sha256$"));
        assert!(verify_password(&stored, "Str0ng!pw"));
        assert!(!verify_password(&stored, "Str0ng!pW"));
        assert!(!verify_password(&stored, ""));
    }

    #[test]
    fn test_salt_differs_per_call() {
        assert_ne!(hash_password("Str0ng!pw"), hash_password("Str0ng!pw"));
    }

    #[test]
    fn test_plaintext_rows_never_verify() {
        assert!(!verify_password("Plain#123", "Plain#123"));
        assert!(!verify_password("", ""));
        assert!(!verify_password("md5$00$abcd", "anything"));
    }

    #[test]
    fn test_malformed_salt_rejected() {
        assert!(!verify_password("sha256$zz$abcd", "anything"));
        assert!(!verify_password("sha256$abc$abcd", "anything"));
    }
}
