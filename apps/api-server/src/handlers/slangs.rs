//! Slang dictionary handlers.
//!
//! Every route here sits behind the auth gateway, so each handler receives
//! the caller as a [`CurrentUser`].

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use zlang_core::domain::{AuthoredSlang, LeaderboardEntry, SlangDraft};
use zlang_core::validation;
use zlang_shared::dto::{LeaderboardEntryResponse, SearchQuery, SlangRequest, SlangResponse};

use crate::middleware::auth::CurrentUser;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/slangs/search?query=
pub async fn search(
    state: web::Data<AppState>,
    _user: CurrentUser,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let slangs = state.slangs.search(&query.query).await?;
    Ok(HttpResponse::Ok().json(slang_responses(slangs)))
}

/// POST /api/slangs
pub async fn create(
    state: web::Data<AppState>,
    CurrentUser(principal): CurrentUser,
    body: web::Json<SlangRequest>,
) -> AppResult<HttpResponse> {
    let draft = draft_from(body.into_inner())?;
    let slang = state.slangs.create(&principal, draft).await?;
    Ok(HttpResponse::Created().json(slang_response(slang)))
}

/// PUT /api/slangs/{id}
pub async fn update(
    state: web::Data<AppState>,
    CurrentUser(principal): CurrentUser,
    path: web::Path<Uuid>,
    body: web::Json<SlangRequest>,
) -> AppResult<HttpResponse> {
    let draft = draft_from(body.into_inner())?;
    let slang = state
        .slangs
        .update(path.into_inner(), draft, &principal)
        .await?;
    Ok(HttpResponse::Ok().json(slang_response(slang)))
}

/// DELETE /api/slangs/{id}
pub async fn delete(
    state: web::Data<AppState>,
    CurrentUser(principal): CurrentUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.slangs.delete(path.into_inner(), &principal).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/slangs/saved
pub async fn saved(
    state: web::Data<AppState>,
    CurrentUser(principal): CurrentUser,
) -> AppResult<HttpResponse> {
    let slangs = state.slangs.saved_slangs(&principal).await?;
    Ok(HttpResponse::Ok().json(slang_responses(slangs)))
}

/// POST /api/slangs/{id}/save
pub async fn save(
    state: web::Data<AppState>,
    CurrentUser(principal): CurrentUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.slangs.save(path.into_inner(), &principal).await?;
    Ok(HttpResponse::Ok().finish())
}

/// DELETE /api/slangs/{id}/save
pub async fn unsave(
    state: web::Data<AppState>,
    CurrentUser(principal): CurrentUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.slangs.unsave(path.into_inner(), &principal).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/slangs/my-slangs
pub async fn my_slangs(
    state: web::Data<AppState>,
    CurrentUser(principal): CurrentUser,
) -> AppResult<HttpResponse> {
    let slangs = state.slangs.my_slangs(&principal).await?;
    Ok(HttpResponse::Ok().json(slang_responses(slangs)))
}

/// POST /api/slangs/{id}/upvote
pub async fn upvote(
    state: web::Data<AppState>,
    CurrentUser(principal): CurrentUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let slang = state.slangs.upvote(path.into_inner(), &principal).await?;
    Ok(HttpResponse::Ok().json(slang_response(slang)))
}

/// POST /api/slangs/{id}/downvote
pub async fn downvote(
    state: web::Data<AppState>,
    CurrentUser(principal): CurrentUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let slang = state.slangs.downvote(path.into_inner(), &principal).await?;
    Ok(HttpResponse::Ok().json(slang_response(slang)))
}

/// GET /api/slangs/leaderboard
pub async fn leaderboard(
    state: web::Data<AppState>,
    _user: CurrentUser,
) -> AppResult<HttpResponse> {
    let entries = state.slangs.leaderboard().await?;
    let body: Vec<LeaderboardEntryResponse> =
        entries.into_iter().map(leaderboard_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

fn draft_from(req: SlangRequest) -> AppResult<SlangDraft> {
    validation::validate_slang(&req.term, &req.meaning)?;
    Ok(SlangDraft::new(
        req.term.trim().to_string(),
        req.meaning.trim().to_string(),
        req.example,
    ))
}

fn slang_response(authored: AuthoredSlang) -> SlangResponse {
    let AuthoredSlang { slang, author_name } = authored;
    let (upvoted_by, downvoted_by) = slang.votes.into_parts();

    SlangResponse {
        id: slang.id,
        term: slang.term,
        meaning: slang.meaning,
        example: slang.example,
        author_id: slang.author_id,
        author_name,
        upvoted_by: upvoted_by.into_iter().collect(),
        downvoted_by: downvoted_by.into_iter().collect(),
    }
}

fn slang_responses(slangs: Vec<AuthoredSlang>) -> Vec<SlangResponse> {
    slangs.into_iter().map(slang_response).collect()
}

fn leaderboard_response(entry: LeaderboardEntry) -> LeaderboardEntryResponse {
    LeaderboardEntryResponse {
        author_name: entry.author_name,
        slang_count: entry.slang_count,
    }
}
