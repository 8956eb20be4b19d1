//! Password hashing and opaque token helpers.
//!
//! Passwords are hashed with Argon2id into PHC-format strings. Session ids
//! and reset tokens are opaque UUIDs; only their SHA-256 digests are ever
//! handed to the store.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use sha2::{Digest, Sha256};

use crate::types::{AppError, Result};

/// When set, switches Argon2 to minimal-cost parameters. Development and
/// test runs only; never set this in production.
pub const FAST_HASHING_ENV: &str = "GATEHOUSE_FAST_HASHING";

fn hasher() -> Argon2<'static> {
    if std::env::var(FAST_HASHING_ENV).is_ok() {
        match Params::new(1024, 1, 1, None) {
            Ok(params) => Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            Err(_) => Argon2::default(),
        }
    } else {
        Argon2::default()
    }
}

/// Hashes a password using Argon2id.
///
/// Returns a PHC-formatted hash string. Cost parameters default to values
/// tuned for interactive logins; see [`FAST_HASHING_ENV`].
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    hasher()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verifies a password against an Argon2 PHC hash.
///
/// A malformed hash reads as a mismatch, never an error.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    match PasswordHash::new(hashed_password) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}

/// Generates an opaque session or reset token.
pub fn generate_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Hashes a token using SHA256 for secure storage.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing() {
        let password = "test_password_123";

        let hash = hash_password(password).expect("should hash password");

        // Hash should not equal the original password
        assert_ne!(hash, password);

        // Hash should be in PHC format (starts with $argon2)
        assert!(hash.starts_with("$argon2"), "hash should be in PHC format");
    }

    #[test]
    fn test_password_verification_success() {
        let password = "secure_password_456";

        let hash = hash_password(password).expect("should hash password");

        assert!(
            verify_password(password, &hash),
            "correct password should verify successfully"
        );
    }

    #[test]
    fn test_password_verification_failure() {
        let password = "correct_password";
        let wrong_password = "wrong_password";

        let hash = hash_password(password).expect("should hash password");

        assert!(
            !verify_password(wrong_password, &hash),
            "wrong password should fail verification"
        );
    }

    #[test]
    fn test_malformed_hash_fails_verification() {
        assert!(
            !verify_password("any_password", "not-a-phc-string"),
            "malformed hash should read as mismatch"
        );
        assert!(!verify_password("any_password", ""), "empty hash should read as mismatch");
    }

    #[test]
    fn test_distinct_passwords_never_cross_verify() {
        let hash_a = hash_password("password-a").expect("should hash");
        let hash_b = hash_password("password-b").expect("should hash");

        assert!(!verify_password("password-a", &hash_b));
        assert!(!verify_password("password-b", &hash_a));
    }

    #[test]
    fn test_token_generation() {
        let token1 = generate_token();
        let token2 = generate_token();

        assert!(!token1.is_empty(), "token should not be empty");
        assert_ne!(token1, token2, "tokens should be unique");
    }

    #[test]
    fn test_hash_token() {
        let token = "some-session-token";

        let hash1 = hash_token(token);
        let hash2 = hash_token(token);

        // Same token should produce same hash
        assert_eq!(hash1, hash2, "same token should hash to same value");

        // Hash should be a hex string (64 chars for SHA256)
        assert_eq!(hash1.len(), 64, "SHA256 hash should be 64 hex characters");
        assert!(
            hash1.chars().all(|c| c.is_ascii_hexdigit()),
            "hash should be hex"
        );
    }

    #[test]
    fn test_hash_token_different_inputs() {
        let hash1 = hash_token("token-a");
        let hash2 = hash_token("token-b");

        assert_ne!(
            hash1, hash2,
            "different tokens should have different hashes"
        );
    }
}
