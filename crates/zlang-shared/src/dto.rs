//! Data Transfer Objects - request/response types for the API.
//!
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Email-shaped login identifier.
    pub username: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response carrying a freshly issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Create or update a slang.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlangRequest {
    pub term: String,
    pub meaning: String,
    #[serde(default)]
    pub example: Option<String>,
}

/// Query string for `GET /api/slangs/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

/// A slang with its author's display name and current votes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlangResponse {
    pub id: Uuid,
    pub term: String,
    pub meaning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    pub author_id: Uuid,
    pub author_name: String,
    pub upvoted_by: Vec<Uuid>,
    pub downvoted_by: Vec<Uuid>,
}

/// One leaderboard row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryResponse {
    pub author_name: String,
    pub slang_count: u64,
}
