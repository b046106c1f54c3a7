//! Authentication ports: bearer tokens and password hashing.

use crate::domain::User;

/// Claims carried by a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject - the user's username.
    pub username: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Issues and verifies signed, time-bound bearer tokens.
pub trait TokenService: Send + Sync {
    /// Issue a token whose subject is the user's username.
    fn issue(&self, user: &User) -> Result<String, AuthError>;

    /// Check signature, payload and expiry, returning the claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of newly issued tokens.
    fn expiration_seconds(&self) -> i64;
}

/// One-way password hashing primitive.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("Token signing failed: {0}")]
    SigningError(String),
}
