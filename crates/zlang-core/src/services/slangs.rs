//! Slang submissions, saved favorites, voting and the leaderboard.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    AuthoredSlang, LeaderboardEntry, Principal, Slang, SlangDraft, UNKNOWN_AUTHOR, User,
    VoteDirection, rank_authors,
};
use crate::error::DomainError;
use crate::ports::{SlangRepository, UserRepository};

/// Application service over the slang and user stores.
///
/// Every operation takes the caller's principal explicitly.
pub struct SlangService {
    slangs: Arc<dyn SlangRepository>,
    users: Arc<dyn UserRepository>,
}

impl SlangService {
    pub fn new(slangs: Arc<dyn SlangRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { slangs, users }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<AuthoredSlang>, DomainError> {
        let slangs = self.slangs.search_by_term(query).await?;
        self.with_author_names(slangs).await
    }

    pub async fn create(
        &self,
        principal: &Principal,
        draft: SlangDraft,
    ) -> Result<AuthoredSlang, DomainError> {
        let slang = self
            .slangs
            .insert(Slang::new(principal.user_id, draft))
            .await?;

        tracing::info!(slang_id = %slang.id, author_id = %principal.user_id, "Slang created");
        Ok(AuthoredSlang {
            slang,
            author_name: principal.name.clone(),
        })
    }

    pub async fn update(
        &self,
        slang_id: Uuid,
        draft: SlangDraft,
        principal: &Principal,
    ) -> Result<AuthoredSlang, DomainError> {
        self.authored_slang(slang_id, principal).await?;
        let slang = self
            .slangs
            .update_content(slang_id, draft)
            .await?
            .ok_or_else(|| DomainError::slang_not_found(slang_id))?;

        tracing::info!(slang_id = %slang.id, "Slang updated");
        Ok(AuthoredSlang {
            slang,
            author_name: principal.name.clone(),
        })
    }

    pub async fn delete(&self, slang_id: Uuid, principal: &Principal) -> Result<(), DomainError> {
        self.authored_slang(slang_id, principal).await?;
        self.slangs.delete(slang_id).await?;

        tracing::info!(%slang_id, "Slang deleted");
        Ok(())
    }

    pub async fn my_slangs(&self, principal: &Principal) -> Result<Vec<AuthoredSlang>, DomainError> {
        let slangs = self.slangs.find_by_author_id(principal.user_id).await?;
        Ok(slangs
            .into_iter()
            .map(|slang| AuthoredSlang {
                slang,
                author_name: principal.name.clone(),
            })
            .collect())
    }

    pub async fn saved_slangs(
        &self,
        principal: &Principal,
    ) -> Result<Vec<AuthoredSlang>, DomainError> {
        let user = self.current_user(principal).await?;
        let ids: Vec<Uuid> = user.saved_slang_ids.into_iter().collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let slangs = self.slangs.find_all_by_id(&ids).await?;
        self.with_author_names(slangs).await
    }

    /// Add a slang to the principal's saved set. Saving twice is a no-op.
    pub async fn save(&self, slang_id: Uuid, principal: &Principal) -> Result<(), DomainError> {
        if self.slangs.find_by_id(slang_id).await?.is_none() {
            return Err(DomainError::slang_not_found(slang_id));
        }

        let mut user = self.current_user(principal).await?;
        if user.save_slang(slang_id) {
            self.users.update(user).await?;
            tracing::debug!(%slang_id, user_id = %principal.user_id, "Slang saved");
        }
        Ok(())
    }

    /// Remove a slang from the principal's saved set. Removing an unsaved id is a no-op.
    pub async fn unsave(&self, slang_id: Uuid, principal: &Principal) -> Result<(), DomainError> {
        let mut user = self.current_user(principal).await?;
        if user.unsave_slang(slang_id) {
            self.users.update(user).await?;
            tracing::debug!(%slang_id, user_id = %principal.user_id, "Slang unsaved");
        }
        Ok(())
    }

    pub async fn upvote(
        &self,
        slang_id: Uuid,
        principal: &Principal,
    ) -> Result<AuthoredSlang, DomainError> {
        self.vote(slang_id, principal, VoteDirection::Up).await
    }

    pub async fn downvote(
        &self,
        slang_id: Uuid,
        principal: &Principal,
    ) -> Result<AuthoredSlang, DomainError> {
        self.vote(slang_id, principal, VoteDirection::Down).await
    }

    /// Authors ranked by number of slangs submitted.
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, DomainError> {
        let counts = self.slangs.count_by_author().await?;
        let author_ids: Vec<Uuid> = counts.iter().map(|c| c.author_id).collect();
        let names = self.author_names(&author_ids).await?;
        Ok(rank_authors(counts, &names))
    }

    async fn vote(
        &self,
        slang_id: Uuid,
        principal: &Principal,
        direction: VoteDirection,
    ) -> Result<AuthoredSlang, DomainError> {
        let slang = self
            .slangs
            .apply_vote(slang_id, principal.user_id, direction)
            .await?
            .ok_or_else(|| DomainError::slang_not_found(slang_id))?;

        tracing::debug!(
            %slang_id,
            user_id = %principal.user_id,
            state = ?slang.votes.state_of(principal.user_id),
            "Vote applied"
        );

        let mut named = self.with_author_names(vec![slang]).await?;
        named
            .pop()
            .ok_or_else(|| DomainError::Internal("vote result lost during name lookup".to_string()))
    }

    /// Load a slang and require the principal to be its author.
    async fn authored_slang(
        &self,
        slang_id: Uuid,
        principal: &Principal,
    ) -> Result<Slang, DomainError> {
        let slang = self
            .slangs
            .find_by_id(slang_id)
            .await?
            .ok_or_else(|| DomainError::slang_not_found(slang_id))?;

        if !slang.is_authored_by(principal.user_id) {
            tracing::warn!(%slang_id, user_id = %principal.user_id, "Rejected edit by non-author");
            return Err(DomainError::Forbidden("slang"));
        }
        Ok(slang)
    }

    /// Fresh copy of the principal's user record.
    async fn current_user(&self, principal: &Principal) -> Result<User, DomainError> {
        self.users
            .find_by_id(principal.user_id)
            .await?
            .ok_or(DomainError::Unauthenticated)
    }

    /// Attach author names using one batched lookup of the distinct author ids.
    async fn with_author_names(
        &self,
        slangs: Vec<Slang>,
    ) -> Result<Vec<AuthoredSlang>, DomainError> {
        let author_ids: Vec<Uuid> = slangs
            .iter()
            .map(|s| s.author_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let names = self.author_names(&author_ids).await?;

        Ok(slangs
            .into_iter()
            .map(|slang| {
                let author_name = names
                    .get(&slang.author_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
                AuthoredSlang { slang, author_name }
            })
            .collect())
    }

    async fn author_names(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>, DomainError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(self
            .users
            .find_all_by_id(ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect())
    }
}
