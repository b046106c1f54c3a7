use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - a registered dictionary contributor.
#[derive(Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Display name shown next to authored slangs and on the leaderboard.
    pub name: String,
    /// Unique, email-shaped login identifier.
    pub username: String,
    pub password_hash: String,
    pub saved_slang_ids: BTreeSet<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID, timestamps and no saved slangs.
    pub fn new(name: String, username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            username,
            password_hash,
            saved_slang_ids: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a slang to the saved set. Returns `false` if it was already saved.
    pub fn save_slang(&mut self, slang_id: Uuid) -> bool {
        let inserted = self.saved_slang_ids.insert(slang_id);
        if inserted {
            self.updated_at = Utc::now();
        }
        inserted
    }

    /// Remove a slang from the saved set. Returns `false` if it was not saved.
    pub fn unsave_slang(&mut self, slang_id: Uuid) -> bool {
        let removed = self.saved_slang_ids.remove(&slang_id);
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }
}

// Keeps the password hash out of logs and panic messages.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("saved_slang_ids", &self.saved_slang_ids)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// The authenticated identity resolved for a request.
///
/// Produced by the auth gateway and passed explicitly into every service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub name: String,
    pub username: String,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            name: user.name.clone(),
            username: user.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(
            "Test User".to_string(),
            "test@example.com".to_string(),
            "$argon2id$secret".to_string(),
        )
    }

    #[test]
    fn test_save_slang_is_idempotent() {
        let mut user = user();
        let slang_id = Uuid::new_v4();

        assert!(user.save_slang(slang_id));
        assert!(!user.save_slang(slang_id));
        assert_eq!(user.saved_slang_ids.len(), 1);
    }

    #[test]
    fn test_unsave_missing_slang_is_noop() {
        let mut user = user();
        let before = user.updated_at;

        assert!(!user.unsave_slang(Uuid::new_v4()));
        assert!(user.saved_slang_ids.is_empty());
        assert_eq!(user.updated_at, before);
    }

    #[test]
    fn test_debug_redacts_password_hash() {
        let rendered = format!("{:?}", user());
        assert!(!rendered.contains("$argon2id$secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
