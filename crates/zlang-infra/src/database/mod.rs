//! Repository implementations: PostgreSQL via SeaORM, and in-memory.

mod connections;
mod memory_repo;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;
pub use memory_repo::{InMemorySlangRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use connections::DatabaseConnections;
#[cfg(feature = "postgres")]
pub use postgres_repo::{PostgresSlangRepository, PostgresUserRepository};


/// Mask a username for logging to avoid PII in logs: `alice@x.com` -> `a***@x.com`.
pub(crate) fn mask_username(username: &str) -> String {
    match username.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod mask_tests {
    use super::mask_username;

    #[test]
    fn test_mask_username() {
        assert_eq!(mask_username("alice@x.com"), "a***@x.com");
        assert_eq!(mask_username("a@x.com"), "***@x.com");
        assert_eq!(mask_username("plain"), "***");
    }
}
