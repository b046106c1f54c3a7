use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{AuthorCount, Slang, SlangDraft, User, VoteDirection};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity. Unique-key clashes fail with `RepoError::Constraint`.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `RepoError::NotFound` if absent.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Credential store.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their login username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Batch lookup. Ids without a user are skipped.
    async fn find_all_by_id(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;
}

/// Slang store.
#[async_trait]
pub trait SlangRepository: BaseRepository<Slang, Uuid> {
    /// Case-insensitive substring match on the term, oldest first.
    /// An empty query matches every slang.
    async fn search_by_term(&self, query: &str) -> Result<Vec<Slang>, RepoError>;

    async fn find_by_author_id(&self, author_id: Uuid) -> Result<Vec<Slang>, RepoError>;

    /// Batch lookup. Ids without a slang are skipped.
    async fn find_all_by_id(&self, ids: &[Uuid]) -> Result<Vec<Slang>, RepoError>;

    /// Number of slangs per author, one row per author with at least one slang.
    async fn count_by_author(&self) -> Result<Vec<AuthorCount>, RepoError>;

    /// Replace term, meaning and example only, leaving the vote sets as
    /// they are in the store. Returns `None` if the slang does not exist.
    async fn update_content(
        &self,
        slang_id: Uuid,
        draft: SlangDraft,
    ) -> Result<Option<Slang>, RepoError>;

    /// Load, toggle and persist a vote as one atomic per-slang update.
    ///
    /// Concurrent votes by different users on the same slang must not lose
    /// updates. Returns `None` if the slang does not exist.
    async fn apply_vote(
        &self,
        slang_id: Uuid,
        user_id: Uuid,
        direction: VoteDirection,
    ) -> Result<Option<Slang>, RepoError>;
}
