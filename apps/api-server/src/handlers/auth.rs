//! Authentication handlers.

use actix_web::{HttpResponse, web};

use zlang_core::services::IssuedToken;
use zlang_core::validation;
use zlang_shared::dto::{AuthResponse, LoginRequest, RegisterRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validation::validate_registration(&req.name, &req.username, &req.password)?;

    let issued = state
        .auth
        .register(req.name.trim(), req.username.trim(), &req.password)
        .await?;

    Ok(HttpResponse::Created().json(auth_response(issued)))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validation::validate_login(&req.username, &req.password)?;

    let issued = state
        .auth
        .login(req.username.trim(), &req.password)
        .await?;

    Ok(HttpResponse::Ok().json(auth_response(issued)))
}

fn auth_response(issued: IssuedToken) -> AuthResponse {
    AuthResponse {
        token: issued.token,
        token_type: "Bearer".to_string(),
        expires_in: u64::try_from(issued.expires_in).unwrap_or_default(),
    }
}
