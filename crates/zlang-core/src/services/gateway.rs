//! Per-request authentication gate.

use std::sync::Arc;

use crate::domain::Principal;
use crate::error::DomainError;
use crate::ports::{TokenService, UserRepository};

/// Routes reachable without a bearer token.
pub const DEFAULT_PUBLIC_PATHS: &[&str] = &["/api/auth/register", "/api/auth/login", "/api/health"];

/// Outcome of a successful gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Public route, no principal attached.
    Anonymous,
    Authenticated(Principal),
}

/// Verifies bearer tokens and resolves the principal for non-public routes.
///
/// Never mutates state.
pub struct AuthGateway {
    tokens: Arc<dyn TokenService>,
    users: Arc<dyn UserRepository>,
    public_paths: Vec<String>,
}

impl AuthGateway {
    pub fn new(tokens: Arc<dyn TokenService>, users: Arc<dyn UserRepository>) -> Self {
        Self {
            tokens,
            users,
            public_paths: DEFAULT_PUBLIC_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn is_public(&self, path: &str) -> bool {
        let path = normalize(path);
        self.public_paths.iter().any(|p| normalize(p) == path)
    }

    /// Decide access for `path` given the raw `Authorization` header value.
    pub async fn authenticate(
        &self,
        path: &str,
        authorization: Option<&str>,
    ) -> Result<Access, DomainError> {
        if self.is_public(path) {
            return Ok(Access::Anonymous);
        }

        let token = authorization
            .and_then(bearer_token)
            .ok_or(DomainError::Unauthenticated)?;

        let claims = self.tokens.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            DomainError::Unauthenticated
        })?;

        let user = self
            .users
            .find_by_username(&claims.username)
            .await?
            .ok_or_else(|| {
                tracing::debug!("Token subject no longer resolves to a user");
                DomainError::Unauthenticated
            })?;

        Ok(Access::Authenticated(Principal::from(&user)))
    }
}

/// Extract the token from `Bearer <token>`. Anything else is malformed.
pub fn bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        None
    } else {
        Some(token)
    }
}

fn normalize(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}
