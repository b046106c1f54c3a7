//! Registration and login.

use std::sync::Arc;

use crate::domain::User;
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, TokenService, UserRepository};

/// A freshly issued bearer token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Orchestrates registration and login over the credential store.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Create a user and issue a token for it.
    ///
    /// Inputs are expected to have passed `validation::validate_registration`.
    pub async fn register(
        &self,
        name: &str,
        username: &str,
        raw_password: &str,
    ) -> Result<IssuedToken, DomainError> {
        let password_hash = self.passwords.hash(raw_password)?;
        let user = User::new(name.to_string(), username.to_string(), password_hash);

        let user = self.users.insert(user).await.map_err(|e| match e {
            RepoError::Constraint(_) => DomainError::DuplicateUsername,
            other => DomainError::Repository(other),
        })?;

        tracing::info!(user_id = %user.id, "User registered");
        self.issue(&user)
    }

    /// Check credentials and issue a token.
    pub async fn login(
        &self,
        username: &str,
        raw_password: &str,
    ) -> Result<IssuedToken, DomainError> {
        let user = self.authenticate(username, raw_password).await?;
        tracing::info!(user_id = %user.id, "User logged in");
        self.issue(&user)
    }

    /// Resolve the user by username and compare the password hash.
    /// Both failure modes surface as `InvalidCredentials`.
    async fn authenticate(&self, username: &str, raw_password: &str) -> Result<User, DomainError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            tracing::debug!("Login rejected: unknown username");
            return Err(DomainError::InvalidCredentials);
        };

        if !self.passwords.verify(raw_password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(DomainError::InvalidCredentials);
        }

        Ok(user)
    }

    fn issue(&self, user: &User) -> Result<IssuedToken, DomainError> {
        Ok(IssuedToken {
            token: self.tokens.issue(user)?,
            expires_in: self.tokens.expiration_seconds(),
        })
    }
}
