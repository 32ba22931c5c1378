use thiserror::Error;

/// Errors from repository operations (used by trait definitions in marketeer-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    /// A UNIQUE constraint was violated; carries the offending column.
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from account and session operations.
///
/// `UsernameTaken` and `EmailTaken` are user-correctable validation
/// failures, never fatal.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("email '{0}' is already registered")]
    EmailTaken(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("password hashing error: {0}")]
    Hashing(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for AuthError {
    fn from(e: RepositoryError) -> Self {
        AuthError::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_repository_error_converts_to_storage() {
        let err: AuthError = RepositoryError::NotFound.into();
        assert!(matches!(err, AuthError::Storage(_)));
    }

    #[test]
    fn test_auth_error_display_is_user_facing() {
        let err = AuthError::UsernameTaken("ada".to_string());
        assert_eq!(err.to_string(), "username 'ada' is already taken");
    }
}
