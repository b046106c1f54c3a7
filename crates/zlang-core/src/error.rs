//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::ports::AuthError;

/// Domain errors - business logic failures.
///
/// None of these are retried; they are either caller/input errors or an
/// infrastructure failure passed through unchanged.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Missing, malformed, invalid or expired token, or unknown principal.
    #[error("Authentication required")]
    Unauthenticated,

    /// Login mismatch. Unknown username and wrong password share this error.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username is already registered")]
    DuplicateUsername,

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("You do not have permission to modify this {0}")]
    Forbidden(&'static str),

    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn slang_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity_type: "slang",
            id,
        }
    }
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => DomainError::InvalidCredentials,
            AuthError::TokenExpired | AuthError::InvalidToken(_) | AuthError::MissingAuth => {
                DomainError::Unauthenticated
            }
            AuthError::HashingError(msg) | AuthError::SigningError(msg) => {
                DomainError::Internal(msg)
            }
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
