//! Session-token authentication extractor.
//!
//! Extracts and resolves bearer session tokens from:
//! - `Authorization: Bearer <token>` header
//! - `X-Session-Token: <token>` header
//!
//! Tokens are SHA-256 hashed and resolved against the `auth_sessions` table
//! through the auth service. Handlers never see raw credentials beyond the
//! opaque token; the extractor is the whole Session/Auth Gate.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sha2::{Digest, Sha256};

use marketeer_types::user::User;

use crate::http::error::AppError;
use crate::state::AppState;

/// The resolved calling identity. Extracting this validates the session.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?;
        let token_hash = hash_token(&token);

        let user = state
            .auth_service
            .resolve_token(&token_hash)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        match user {
            Some(user) => Ok(CurrentUser(user)),
            None => Err(AppError::Unauthorized(
                "Invalid or expired session token. Log in again via POST /api/v1/auth/login."
                    .to_string(),
            )),
        }
    }
}

/// Extract the session token from request headers.
pub fn extract_token(parts: &Parts) -> Result<String, AppError> {
    // Try Authorization: Bearer <token>
    if let Some(auth) = parts.headers.get("authorization") {
        let auth_str = auth.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid Authorization header encoding".to_string())
        })?;
        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    // Try X-Session-Token header
    if let Some(token) = parts.headers.get("x-session-token") {
        let token_str = token.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid X-Session-Token header encoding".to_string())
        })?;
        return Ok(token_str.trim().to_string());
    }

    Err(AppError::Unauthorized(
        "Missing session token. Provide via 'Authorization: Bearer <token>' or 'X-Session-Token: <token>' header.".to_string(),
    ))
}

/// Compute the SHA-256 hash of a session token (lowercase hex).
///
/// Only this hash is ever stored or compared; the plaintext token exists
/// solely in the login response and the client's headers.
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{:x}", digest)
}

/// Generate a fresh session token: 32 random bytes, hex-encoded, prefixed
/// so tokens are recognizable in configs and logs.
pub fn generate_token() -> String {
    use aes_gcm::aead::{rand_core::RngCore, OsRng};
    let mut token_bytes = [0u8; 32];
    OsRng.fill_bytes(&mut token_bytes);
    format!(
        "mktr_{}",
        token_bytes
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<String>()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token_is_lowercase_hex() {
        let hash = hash_token("mktr_test");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(hash.chars().all(|c| !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_hash_token_deterministic() {
        assert_eq!(hash_token("abc"), hash_token("abc"));
        assert_ne!(hash_token("abc"), hash_token("abd"));
    }

    #[test]
    fn test_generated_tokens_are_unique_and_prefixed() {
        let a = generate_token();
        let b = generate_token();
        assert!(a.starts_with("mktr_"));
        assert_eq!(a.len(), 5 + 64);
        assert_ne!(a, b);
    }
}
