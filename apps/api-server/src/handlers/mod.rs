//! HTTP handlers and route configuration.

mod auth;
mod health;
mod slangs;

use actix_web::{HttpRequest, error::JsonPayloadError, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register))
                        .route("/login", web::post().to(auth::login)),
                )
                // Fixed segments first so they never match `{id}`
                .service(
                    web::scope("/slangs")
                        .route("", web::post().to(slangs::create))
                        .route("/search", web::get().to(slangs::search))
                        .route("/saved", web::get().to(slangs::saved))
                        .route("/my-slangs", web::get().to(slangs::my_slangs))
                        .route("/leaderboard", web::get().to(slangs::leaderboard))
                        .route("/{id}", web::put().to(slangs::update))
                        .route("/{id}", web::delete().to(slangs::delete))
                        .route("/{id}/save", web::post().to(slangs::save))
                        .route("/{id}/save", web::delete().to(slangs::unsave))
                        .route("/{id}/upvote", web::post().to(slangs::upvote))
                        .route("/{id}/downvote", web::post().to(slangs::downvote)),
                ),
        );
}

/// Malformed JSON bodies become problem-details 400s.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");
    AppError::BadRequest(err.to_string()).into()
}
