//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Every write takes the store's write lock, so each operation is atomic per
//! entity. Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use zlang_core::domain::{AuthorCount, Slang, SlangDraft, User, VoteDirection};
use zlang_core::error::RepoError;
use zlang_core::ports::{BaseRepository, SlangRepository, UserRepository};

use super::mask_username;

/// In-memory credential store with a unique username index.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;

        if store.contains_key(&user.id) {
            return Err(RepoError::Constraint("users_pkey".to_string()));
        }
        if store.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint("users_username_key".to_string()));
        }

        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;

        if !store.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        if store
            .values()
            .any(|u| u.id != user.id && u.username == user.username)
        {
            return Err(RepoError::Constraint("users_username_key".to_string()));
        }

        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username = %mask_username(username), "Finding user by username");

        let store = self.store.read().await;
        Ok(store.values().find(|u| u.username == username).cloned())
    }

    async fn find_all_by_id(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let store = self.store.read().await;
        Ok(ids.iter().filter_map(|id| store.get(id).cloned()).collect())
    }
}

/// In-memory slang store.
#[derive(Default)]
pub struct InMemorySlangRepository {
    store: RwLock<HashMap<Uuid, Slang>>,
}

impl InMemorySlangRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matching slangs, oldest first.
    async fn collect_sorted<F>(&self, predicate: F) -> Vec<Slang>
    where
        F: Fn(&Slang) -> bool,
    {
        let store = self.store.read().await;
        let mut slangs: Vec<Slang> = store.values().filter(|&s| predicate(s)).cloned().collect();
        slangs.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        slangs
    }
}

#[async_trait]
impl BaseRepository<Slang, Uuid> for InMemorySlangRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Slang>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, slang: Slang) -> Result<Slang, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&slang.id) {
            return Err(RepoError::Constraint("slangs_pkey".to_string()));
        }
        store.insert(slang.id, slang.clone());
        Ok(slang)
    }

    async fn update(&self, slang: Slang) -> Result<Slang, RepoError> {
        let mut store = self.store.write().await;
        match store.get_mut(&slang.id) {
            Some(existing) => {
                *existing = slang.clone();
                Ok(slang)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl SlangRepository for InMemorySlangRepository {
    async fn search_by_term(&self, query: &str) -> Result<Vec<Slang>, RepoError> {
        let needle = query.to_lowercase();
        Ok(self
            .collect_sorted(|s| s.term.to_lowercase().contains(&needle))
            .await)
    }

    async fn find_by_author_id(&self, author_id: Uuid) -> Result<Vec<Slang>, RepoError> {
        Ok(self.collect_sorted(|s| s.author_id == author_id).await)
    }

    async fn find_all_by_id(&self, ids: &[Uuid]) -> Result<Vec<Slang>, RepoError> {
        Ok(self.collect_sorted(|s| ids.contains(&s.id)).await)
    }

    async fn count_by_author(&self) -> Result<Vec<AuthorCount>, RepoError> {
        let slangs = self.collect_sorted(|_| true).await;

        // Rows come out in order of each author's first slang.
        let mut counts: Vec<AuthorCount> = Vec::new();
        for slang in slangs {
            match counts.iter_mut().find(|c| c.author_id == slang.author_id) {
                Some(count) => count.slang_count += 1,
                None => counts.push(AuthorCount {
                    author_id: slang.author_id,
                    slang_count: 1,
                }),
            }
        }
        Ok(counts)
    }

    async fn update_content(
        &self,
        slang_id: Uuid,
        draft: SlangDraft,
    ) -> Result<Option<Slang>, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.get_mut(&slang_id).map(|slang| {
            slang.apply_edit(draft);
            slang.clone()
        }))
    }

    async fn apply_vote(
        &self,
        slang_id: Uuid,
        user_id: Uuid,
        direction: VoteDirection,
    ) -> Result<Option<Slang>, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.get_mut(&slang_id).map(|slang| {
            slang.cast_vote(user_id, direction);
            slang.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use zlang_core::domain::{SlangDraft, VoteState};

    use super::*;

    fn slang(author_id: Uuid, term: &str) -> Slang {
        Slang::new(
            author_id,
            SlangDraft::new(term.to_string(), "meaning".to_string(), None),
        )
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_username() {
        let repo = InMemoryUserRepository::new();
        repo.insert(User::new("A".into(), "a@x.com".into(), "h".into()))
            .await
            .unwrap();

        let result = repo
            .insert(User::new("B".into(), "a@x.com".into(), "h".into()))
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_find_all_by_id_skips_missing() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .insert(User::new("A".into(), "a@x.com".into(), "h".into()))
            .await
            .unwrap();

        let found = repo.find_all_by_id(&[user.id, Uuid::new_v4()]).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, user.id);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let repo = InMemorySlangRepository::new();
        let author = Uuid::new_v4();
        repo.insert(slang(author, "YOLO")).await.unwrap();
        repo.insert(slang(author, "rizz")).await.unwrap();

        let hits = repo.search_by_term("olo").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].term, "YOLO");

        assert_eq!(repo.search_by_term("").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_count_by_author_groups() {
        let repo = InMemorySlangRepository::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        for (author, term) in [(a, "one"), (b, "two"), (a, "three")] {
            repo.insert(slang(author, term)).await.unwrap();
        }

        let counts = repo.count_by_author().await.unwrap();

        let for_a = counts.iter().find(|c| c.author_id == a).unwrap();
        let for_b = counts.iter().find(|c| c.author_id == b).unwrap();
        assert_eq!(for_a.slang_count, 2);
        assert_eq!(for_b.slang_count, 1);
    }

    #[tokio::test]
    async fn test_apply_vote_missing_slang() {
        let repo = InMemorySlangRepository::new();
        let result = repo
            .apply_vote(Uuid::new_v4(), Uuid::new_v4(), VoteDirection::Up)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_content_keeps_stored_votes() {
        let repo = InMemorySlangRepository::new();
        let target = repo.insert(slang(Uuid::new_v4(), "bet")).await.unwrap();
        let voter = Uuid::new_v4();
        repo.apply_vote(target.id, voter, VoteDirection::Down)
            .await
            .unwrap();

        let edited = repo
            .update_content(
                target.id,
                SlangDraft::new("bet".into(), "agreed".into(), Some("bet, see you".into())),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(edited.meaning, "agreed");
        assert_eq!(edited.votes.state_of(voter), VoteState::Downvoted);
        assert!(
            repo.update_content(Uuid::new_v4(), SlangDraft::new("x".into(), "y".into(), None))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_votes_are_not_lost() {
        let repo = Arc::new(InMemorySlangRepository::new());
        let target = repo.insert(slang(Uuid::new_v4(), "bet")).await.unwrap();
        let voters: Vec<Uuid> = (0..32).map(|_| Uuid::new_v4()).collect();

        let handles: Vec<_> = voters
            .iter()
            .map(|&voter| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.apply_vote(target.id, voter, VoteDirection::Up).await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = repo.find_by_id(target.id).await.unwrap().unwrap();
        assert_eq!(stored.votes.upvoted_by().len(), voters.len());
        for voter in voters {
            assert_eq!(stored.votes.state_of(voter), VoteState::Upvoted);
        }
    }
}
