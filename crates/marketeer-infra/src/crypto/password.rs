//! Argon2id password hashing.
//!
//! Implements the `PasswordHasher` trait from `marketeer-core` using the
//! `argon2` crate (RustCrypto ecosystem) with default parameters and a
//! random per-password salt.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHasher as _};

use marketeer_core::user::hash::PasswordHasher;
use marketeer_types::error::AuthError;

/// Argon2id implementation of `PasswordHasher`.
///
/// Produces PHC-format hash strings (`$argon2id$...`) that embed the salt
/// and parameters, so verification needs no extra state.
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create a new hasher with default argon2id parameters.
    pub fn new() -> Self {
        Self
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash_password("hunter2").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("hunter2", &hash));
        assert!(!hasher.verify_password("hunter3", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = Argon2PasswordHasher::new();
        let a = hasher.hash_password("same-password").unwrap();
        let b = hasher.hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_stored_hash_verifies_false() {
        let hasher = Argon2PasswordHasher::new();
        assert!(!hasher.verify_password("pw", "not-a-phc-string"));
        assert!(!hasher.verify_password("pw", ""));
    }
}
