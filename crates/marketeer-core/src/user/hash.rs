//! Password hashing seam.
//!
//! Core depends on this trait only; the argon2 implementation lives in
//! marketeer-infra so the hashing backend can change without touching the
//! auth logic.

use marketeer_types::error::AuthError;

pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage.
    fn hash_password(&self, password: &str) -> Result<String, AuthError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// Malformed stored hashes verify as false rather than erroring.
    fn verify_password(&self, password: &str, stored_hash: &str) -> bool;
}
