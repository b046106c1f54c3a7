use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Slang entity - a community-submitted term definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slang {
    pub id: Uuid,
    pub term: String,
    pub meaning: String,
    pub example: Option<String>,
    /// Author of the entry. Never changes after creation.
    pub author_id: Uuid,
    pub votes: Votes,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Slang {
    /// Create a new slang authored by `author_id`, with no votes.
    pub fn new(author_id: Uuid, draft: SlangDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            term: draft.term,
            meaning: draft.meaning,
            example: draft.example,
            author_id,
            votes: Votes::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// Replace the editable fields. The author is left untouched.
    pub fn apply_edit(&mut self, draft: SlangDraft) {
        self.term = draft.term;
        self.meaning = draft.meaning;
        self.example = draft.example;
        self.updated_at = Utc::now();
    }

    /// Apply a vote toggle for `user_id` and bump the update timestamp.
    pub fn cast_vote(&mut self, user_id: Uuid, direction: VoteDirection) -> VoteState {
        let state = self.votes.apply(user_id, direction);
        self.updated_at = Utc::now();
        state
    }
}

/// Editable slang fields, as submitted by the author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlangDraft {
    pub term: String,
    pub meaning: String,
    pub example: Option<String>,
}

impl SlangDraft {
    /// Build a draft, storing a blank example as absent.
    pub fn new(term: String, meaning: String, example: Option<String>) -> Self {
        Self {
            term,
            meaning,
            example: example.filter(|e| !e.trim().is_empty()),
        }
    }
}

/// A slang together with its author's display name.
#[derive(Debug, Clone)]
pub struct AuthoredSlang {
    pub slang: Slang,
    pub author_name: String,
}

/// Which way a user is voting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

/// A single user's vote on a slang.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteState {
    None,
    Upvoted,
    Downvoted,
}

/// Upvoter and downvoter sets of a slang.
///
/// A user id is in at most one of the two sets. The only mutators are the
/// toggle transitions, which clear the opposite set before toggling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Votes {
    upvoted_by: BTreeSet<Uuid>,
    downvoted_by: BTreeSet<Uuid>,
}

impl Votes {
    /// Rebuild from stored sets. A user found in both sets keeps the upvote.
    pub fn from_parts(upvoted_by: BTreeSet<Uuid>, downvoted_by: BTreeSet<Uuid>) -> Self {
        let downvoted_by = downvoted_by
            .into_iter()
            .filter(|id| !upvoted_by.contains(id))
            .collect();
        Self {
            upvoted_by,
            downvoted_by,
        }
    }

    pub fn upvoted_by(&self) -> &BTreeSet<Uuid> {
        &self.upvoted_by
    }

    pub fn downvoted_by(&self) -> &BTreeSet<Uuid> {
        &self.downvoted_by
    }

    pub fn state_of(&self, user_id: Uuid) -> VoteState {
        if self.upvoted_by.contains(&user_id) {
            VoteState::Upvoted
        } else if self.downvoted_by.contains(&user_id) {
            VoteState::Downvoted
        } else {
            VoteState::None
        }
    }

    /// `none|downvoted -> upvoted`, `upvoted -> none`.
    pub fn upvote(&mut self, user_id: Uuid) -> VoteState {
        self.downvoted_by.remove(&user_id);
        if self.upvoted_by.remove(&user_id) {
            VoteState::None
        } else {
            self.upvoted_by.insert(user_id);
            VoteState::Upvoted
        }
    }

    /// `none|upvoted -> downvoted`, `downvoted -> none`.
    pub fn downvote(&mut self, user_id: Uuid) -> VoteState {
        self.upvoted_by.remove(&user_id);
        if self.downvoted_by.remove(&user_id) {
            VoteState::None
        } else {
            self.downvoted_by.insert(user_id);
            VoteState::Downvoted
        }
    }

    pub fn apply(&mut self, user_id: Uuid, direction: VoteDirection) -> VoteState {
        match direction {
            VoteDirection::Up => self.upvote(user_id),
            VoteDirection::Down => self.downvote(user_id),
        }
    }

    pub fn into_parts(self) -> (BTreeSet<Uuid>, BTreeSet<Uuid>) {
        (self.upvoted_by, self.downvoted_by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exclusive(votes: &Votes) {
        assert!(votes.upvoted_by().is_disjoint(votes.downvoted_by()));
    }

    #[test]
    fn test_upvote_twice_returns_to_none() {
        let mut votes = Votes::default();
        let user = Uuid::new_v4();

        assert_eq!(votes.upvote(user), VoteState::Upvoted);
        assert_eq!(votes.upvote(user), VoteState::None);
        assert_eq!(votes.state_of(user), VoteState::None);
        assert!(votes.upvoted_by().is_empty());
    }

    #[test]
    fn test_downvote_twice_returns_to_none() {
        let mut votes = Votes::default();
        let user = Uuid::new_v4();

        votes.downvote(user);
        votes.downvote(user);

        assert_eq!(votes.state_of(user), VoteState::None);
        assert!(votes.downvoted_by().is_empty());
    }

    #[test]
    fn test_upvote_clears_downvote() {
        let mut votes = Votes::default();
        let user = Uuid::new_v4();

        votes.downvote(user);
        assert_eq!(votes.upvote(user), VoteState::Upvoted);

        assert!(!votes.downvoted_by().contains(&user));
        assert!(votes.upvoted_by().contains(&user));
        assert_exclusive(&votes);
    }

    #[test]
    fn test_downvote_clears_upvote() {
        let mut votes = Votes::default();
        let user = Uuid::new_v4();

        votes.upvote(user);
        assert_eq!(votes.downvote(user), VoteState::Downvoted);

        assert!(!votes.upvoted_by().contains(&user));
        assert_exclusive(&votes);
    }

    #[test]
    fn test_exclusivity_holds_over_mixed_sequence() {
        let mut votes = Votes::default();
        let users: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let sequence = [
            VoteDirection::Up,
            VoteDirection::Down,
            VoteDirection::Down,
            VoteDirection::Up,
            VoteDirection::Up,
        ];

        for (i, direction) in sequence.iter().cycle().take(20).enumerate() {
            votes.apply(users[i % users.len()], *direction);
            assert_exclusive(&votes);
        }
    }

    #[test]
    fn test_votes_are_independent_per_user() {
        let mut votes = Votes::default();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        votes.upvote(alice);
        votes.downvote(bob);

        assert_eq!(votes.state_of(alice), VoteState::Upvoted);
        assert_eq!(votes.state_of(bob), VoteState::Downvoted);
        assert_eq!(votes.upvoted_by().len(), 1);
        assert_eq!(votes.downvoted_by().len(), 1);
    }

    #[test]
    fn test_from_parts_resolves_overlap() {
        let user = Uuid::new_v4();
        let votes = Votes::from_parts(BTreeSet::from([user]), BTreeSet::from([user]));

        assert_eq!(votes.state_of(user), VoteState::Upvoted);
        assert_exclusive(&votes);
    }

    #[test]
    fn test_draft_drops_blank_example() {
        let draft = SlangDraft::new("yolo".into(), "you only live once".into(), Some("  ".into()));
        assert_eq!(draft.example, None);
    }

    #[test]
    fn test_edit_keeps_author() {
        let author = Uuid::new_v4();
        let mut slang = Slang::new(author, SlangDraft::new("a".into(), "b".into(), None));

        slang.apply_edit(SlangDraft::new("c".into(), "d".into(), Some("e".into())));

        assert_eq!(slang.term, "c");
        assert_eq!(slang.example.as_deref(), Some("e"));
        assert!(slang.is_authored_by(author));
    }
}
