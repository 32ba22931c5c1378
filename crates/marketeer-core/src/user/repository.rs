//! UserRepository trait definition.
//!
//! Account and auth-session persistence. Implementations live in
//! marketeer-infra. Uses native async fn in traits (RPITIT, Rust 2024
//! edition).

use chrono::{DateTime, Utc};
use marketeer_types::error::RepositoryError;
use marketeer_types::user::{AuthSession, User};
use uuid::Uuid;

pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// UNIQUE violations surface as `RepositoryError::Conflict` carrying the
    /// offending column so the service can tell username from email.
    fn create_user(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    fn get_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// All accounts, oldest first.
    fn list_users(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<User>, RepositoryError>> + Send;

    fn count_users(&self)
        -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Persist a new auth session (token stored hashed).
    fn create_session(
        &self,
        session: &AuthSession,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Resolve a token hash to its user, ignoring expired sessions.
    fn get_user_by_token_hash(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Remove a session by token hash. Removing a missing session is a no-op.
    fn delete_session(
        &self,
        token_hash: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
