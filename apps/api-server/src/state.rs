//! Application state - shared across all handlers.

use std::sync::Arc;

use zlang_core::ports::{PasswordService, SlangRepository, TokenService, UserRepository};
use zlang_core::services::{AuthGateway, AuthService, SlangService};
use zlang_infra::{
    Argon2PasswordService, InMemorySlangRepository, InMemoryUserRepository, JwtConfig,
    JwtTokenService,
};

#[cfg(feature = "postgres")]
use zlang_infra::{DatabaseConnections, PostgresSlangRepository, PostgresUserRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub slangs: Arc<SlangService>,
    pub gateway: Arc<AuthGateway>,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

struct Repositories {
    users: Arc<dyn UserRepository>,
    slangs: Arc<dyn SlangRepository>,
}

impl Repositories {
    fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            slangs: Arc::new(InMemorySlangRepository::new()),
        }
    }
}

impl AppState {
    /// Build the application state, backed by PostgreSQL when configured.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let (db, repos) = match config.database.as_ref() {
            Some(db_config) => match DatabaseConnections::init(db_config).await {
                Ok(connections) => {
                    let conn = Arc::new(connections);
                    let repos = Repositories {
                        users: Arc::new(PostgresUserRepository::new(conn.main.clone())),
                        slangs: Arc::new(PostgresSlangRepository::new(conn.main.clone())),
                    };
                    (Some(conn), repos)
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        "Failed to connect to database. Using in-memory fallback."
                    );
                    (None, Repositories::in_memory())
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, Repositories::in_memory())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repos = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Repositories::in_memory()
        };

        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        #[allow(unused_mut)]
        let mut state = Self::assemble(repos, tokens, Arc::new(Argon2PasswordService::default()));
        #[cfg(feature = "postgres")]
        {
            state.db = db;
        }

        tracing::info!("Application state initialized");
        state
    }

    /// In-memory state with a caller-chosen password hasher.
    pub fn in_memory_with(jwt: JwtConfig, passwords: Arc<dyn PasswordService>) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(jwt));
        Self::assemble(Repositories::in_memory(), tokens, passwords)
    }

    fn assemble(
        repos: Repositories,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        let Repositories { users, slangs } = repos;

        Self {
            auth: Arc::new(AuthService::new(users.clone(), passwords, tokens.clone())),
            slangs: Arc::new(SlangService::new(slangs, users.clone())),
            gateway: Arc::new(AuthGateway::new(tokens, users)),
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}
