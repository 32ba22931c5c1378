//! Auth service: registration, credential checks, and bearer sessions.
//!
//! Token plaintext never reaches this layer — the API boundary generates the
//! random token, hashes it, and passes only the hash down. The service owns
//! validation, hashing of passwords, and session lifetime.

use chrono::{Duration, Utc};
use marketeer_types::error::{AuthError, RepositoryError};
use marketeer_types::user::{AuthSession, User};
use tracing::info;
use uuid::Uuid;

use crate::user::hash::PasswordHasher;
use crate::user::repository::UserRepository;

pub struct AuthService<U: UserRepository, H: PasswordHasher> {
    users: U,
    hasher: H,
    session_ttl: Duration,
}

impl<U: UserRepository, H: PasswordHasher> AuthService<U, H> {
    pub fn new(users: U, hasher: H, session_ttl: Duration) -> Self {
        Self {
            users,
            hasher,
            session_ttl,
        }
    }

    /// Access the user repository.
    pub fn users(&self) -> &U {
        &self.users
    }

    /// Register a new account.
    ///
    /// Duplicate username/email come back as user-correctable
    /// `UsernameTaken` / `EmailTaken`, never as a fatal error.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let password_hash = self.hasher.hash_password(password)?;
        let user = User {
            id: Uuid::now_v7(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            created_at: Utc::now(),
        };

        match self.users.create_user(&user).await {
            Ok(()) => {
                info!(user_id = %user.id, username = %user.username, "account registered");
                Ok(user)
            }
            Err(RepositoryError::Conflict(column)) if column.contains("username") => {
                Err(AuthError::UsernameTaken(username.to_string()))
            }
            Err(RepositoryError::Conflict(_)) => Err(AuthError::EmailTaken(email.to_string())),
            Err(other) => Err(other.into()),
        }
    }

    /// Check a username/password pair.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let Some(user) = self.users.get_by_username(username).await? else {
            return Err(AuthError::InvalidCredentials);
        };
        if !self.hasher.verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(user)
    }

    /// Open a session for a verified user. `token_hash` is the SHA-256 of
    /// the plaintext bearer token issued at the boundary.
    pub async fn open_session(
        &self,
        user_id: Uuid,
        token_hash: String,
    ) -> Result<AuthSession, AuthError> {
        let now = Utc::now();
        let session = AuthSession {
            id: Uuid::now_v7(),
            user_id,
            token_hash,
            created_at: now,
            expires_at: now + self.session_ttl,
        };
        self.users.create_session(&session).await?;
        Ok(session)
    }

    /// Resolve a token hash to the current user, if any.
    pub async fn resolve_token(&self, token_hash: &str) -> Result<Option<User>, AuthError> {
        Ok(self
            .users
            .get_user_by_token_hash(token_hash, Utc::now())
            .await?)
    }

    /// Revoke a session. Unknown tokens are a silent no-op.
    pub async fn close_session(&self, token_hash: &str) -> Result<(), AuthError> {
        self.users.delete_session(token_hash).await?;
        Ok(())
    }
}
