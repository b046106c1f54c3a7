//! Domain entities - the core business objects.

mod leaderboard;
mod slang;
mod user;

pub use leaderboard::{AuthorCount, LeaderboardEntry, UNKNOWN_AUTHOR, rank_authors};
pub use slang::{AuthoredSlang, Slang, SlangDraft, VoteDirection, VoteState, Votes};
pub use user::{Principal, User};
