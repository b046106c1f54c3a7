use std::sync::Arc;

use actix_web::{App, test, web};
use serde_json::{Value, json};

use api_server::AppState;
use api_server::handlers::configure_routes;
use api_server::middleware::auth::AuthGatewayMiddleware;
use zlang_core::ports::{AuthError, PasswordService};
use zlang_infra::JwtConfig;

/// Keeps the HTTP tests fast; Argon2 is covered in the infra crate.
struct PlainPasswordService;

impl PasswordService for PlainPasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash == format!("plain:{password}"))
    }
}

macro_rules! test_app {
    () => {{
        let state = AppState::in_memory_with(JwtConfig::default(), Arc::new(PlainPasswordService));
        test::init_service(
            App::new()
                .wrap(AuthGatewayMiddleware::new(state.gateway.clone()))
                .app_data(web::Data::new(state.clone()))
                .configure(configure_routes),
        )
        .await
    }};
}

/// Registers a user and yields its bearer header value.
macro_rules! register {
    ($app:expr, $name:expr, $username:expr) => {{
        let resp = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "name": $name,
                "username": $username,
                "password": "password123"
            }))
            .send_request(&$app)
            .await;
        assert_eq!(resp.status(), 201);
        let body: Value = test::read_body_json(resp).await;
        format!("Bearer {}", body["token"].as_str().unwrap())
    }};
}

macro_rules! create_slang {
    ($app:expr, $bearer:expr, $term:expr) => {{
        let resp = test::TestRequest::post()
            .uri("/api/slangs")
            .insert_header(("Authorization", $bearer.as_str()))
            .set_json(json!({ "term": $term, "meaning": "some meaning" }))
            .send_request(&$app)
            .await;
        assert_eq!(resp.status(), 201);
        let body: Value = test::read_body_json(resp).await;
        body
    }};
}

#[actix_web::test]
async fn test_health_is_public() {
    let app = test_app!();

    let resp = test::TestRequest::get()
        .uri("/api/health")
        .send_request(&app)
        .await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[actix_web::test]
async fn test_register_and_login() {
    let app = test_app!();

    let register_response = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Ann",
            "username": "ann@example.com",
            "password": "password123"
        }))
        .send_request(&app)
        .await;

    assert_eq!(register_response.status(), 201);
    let register_body: Value = test::read_body_json(register_response).await;
    assert!(register_body["token"].is_string());
    assert_eq!(register_body["tokenType"], "Bearer");
    assert_eq!(register_body["expiresIn"], 24 * 3600);

    let login_response = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({
            "username": "ann@example.com",
            "password": "password123"
        }))
        .send_request(&app)
        .await;

    assert_eq!(login_response.status(), 200);
    let login_body: Value = test::read_body_json(login_response).await;
    assert!(login_body["token"].is_string());
}

#[actix_web::test]
async fn test_invalid_login_is_indistinguishable() {
    let app = test_app!();
    register!(app, "Ann", "ann@example.com");

    let wrong_password = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "ann@example.com", "password": "nope-nope" }))
        .send_request(&app)
        .await;
    assert_eq!(wrong_password.status(), 401);
    let wrong_password: Value = test::read_body_json(wrong_password).await;

    let unknown_user = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "ghost@example.com", "password": "nope-nope" }))
        .send_request(&app)
        .await;
    assert_eq!(unknown_user.status(), 401);
    let unknown_user: Value = test::read_body_json(unknown_user).await;

    assert_eq!(wrong_password, unknown_user);
}

#[actix_web::test]
async fn test_duplicate_registration_conflicts() {
    let app = test_app!();
    register!(app, "Ann", "ann@example.com");

    let resp = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Other Ann",
            "username": "ann@example.com",
            "password": "password123"
        }))
        .send_request(&app)
        .await;

    assert_eq!(resp.status(), 409);
}

#[actix_web::test]
async fn test_invalid_registration_lists_problems() {
    let app = test_app!();

    let resp = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "name": " ", "username": "not-an-email", "password": "123" }))
        .send_request(&app)
        .await;

    assert_eq!(resp.status(), 422);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(3));
}

#[actix_web::test]
async fn test_malformed_body_is_bad_request() {
    let app = test_app!();

    let resp = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .send_request(&app)
        .await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_protected_routes_require_token() {
    let app = test_app!();

    let missing = test::TestRequest::get()
        .uri("/api/slangs/search?query=")
        .send_request(&app)
        .await;
    assert_eq!(missing.status(), 401);
    let body: Value = test::read_body_json(missing).await;
    assert_eq!(body["status"], 401);

    let garbage = test::TestRequest::get()
        .uri("/api/slangs/leaderboard")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .send_request(&app)
        .await;
    assert_eq!(garbage.status(), 401);

    let wrong_scheme = test::TestRequest::get()
        .uri("/api/slangs/my-slangs")
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .send_request(&app)
        .await;
    assert_eq!(wrong_scheme.status(), 401);
}

#[actix_web::test]
async fn test_create_search_and_vote() {
    let app = test_app!();
    let bearer = register!(app, "Ann", "ann@example.com");

    let created = create_slang!(app, bearer, "YOLO");
    assert_eq!(created["authorName"], "Ann");
    assert!(created.get("example").is_none());
    let id = created["id"].as_str().unwrap().to_string();

    let hits: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/slangs/search?query=olo")
            .insert_header(("Authorization", bearer.as_str()))
            .to_request(),
    )
    .await;
    assert_eq!(hits.as_array().map(Vec::len), Some(1));
    assert_eq!(hits[0]["term"], "YOLO");

    let vote = |path: &'static str| {
        test::TestRequest::post()
            .uri(&format!("/api/slangs/{id}/{path}"))
            .insert_header(("Authorization", bearer.as_str()))
            .to_request()
    };

    let up: Value = test::call_and_read_body_json(&app, vote("upvote")).await;
    assert_eq!(up["upvotedBy"].as_array().map(Vec::len), Some(1));

    let down: Value = test::call_and_read_body_json(&app, vote("downvote")).await;
    assert_eq!(down["upvotedBy"].as_array().map(Vec::len), Some(0));
    assert_eq!(down["downvotedBy"].as_array().map(Vec::len), Some(1));

    let cleared: Value = test::call_and_read_body_json(&app, vote("downvote")).await;
    assert_eq!(cleared["downvotedBy"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn test_only_author_can_modify() {
    let app = test_app!();
    let author = register!(app, "Ann", "ann@example.com");
    let stranger = register!(app, "Bob", "bob@example.com");

    let created = create_slang!(app, author, "rizz");
    let uri = format!("/api/slangs/{}", created["id"].as_str().unwrap());

    let edit = test::TestRequest::put()
        .uri(&uri)
        .insert_header(("Authorization", stranger.as_str()))
        .set_json(json!({ "term": "hijacked", "meaning": "nope" }))
        .send_request(&app)
        .await;
    assert_eq!(edit.status(), 403);

    let delete = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("Authorization", stranger.as_str()))
        .send_request(&app)
        .await;
    assert_eq!(delete.status(), 403);

    let edit = test::TestRequest::put()
        .uri(&uri)
        .insert_header(("Authorization", author.as_str()))
        .set_json(json!({ "term": "rizz", "meaning": "charisma", "example": "he has rizz" }))
        .send_request(&app)
        .await;
    assert_eq!(edit.status(), 200);
    let edited: Value = test::read_body_json(edit).await;
    assert_eq!(edited["meaning"], "charisma");
    assert_eq!(edited["example"], "he has rizz");

    let delete = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("Authorization", author.as_str()))
        .send_request(&app)
        .await;
    assert_eq!(delete.status(), 204);

    let gone = test::TestRequest::post()
        .uri(&format!("{uri}/upvote"))
        .insert_header(("Authorization", author.as_str()))
        .send_request(&app)
        .await;
    assert_eq!(gone.status(), 404);
}

#[actix_web::test]
async fn test_save_and_unsave() {
    let app = test_app!();
    let author = register!(app, "Ann", "ann@example.com");
    let reader = register!(app, "Bob", "bob@example.com");

    let created = create_slang!(app, author, "bet");
    let save_uri = format!("/api/slangs/{}/save", created["id"].as_str().unwrap());

    for _ in 0..2 {
        let resp = test::TestRequest::post()
            .uri(&save_uri)
            .insert_header(("Authorization", reader.as_str()))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), 200);
    }

    let saved_request = || {
        test::TestRequest::get()
            .uri("/api/slangs/saved")
            .insert_header(("Authorization", reader.as_str()))
            .to_request()
    };

    let saved: Value = test::call_and_read_body_json(&app, saved_request()).await;
    assert_eq!(saved.as_array().map(Vec::len), Some(1));
    assert_eq!(saved[0]["authorName"], "Ann");

    let resp = test::TestRequest::delete()
        .uri(&save_uri)
        .insert_header(("Authorization", reader.as_str()))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 204);

    let saved: Value = test::call_and_read_body_json(&app, saved_request()).await;
    assert_eq!(saved, json!([]));
}

#[actix_web::test]
async fn test_my_slangs_and_leaderboard() {
    let app = test_app!();
    let ann = register!(app, "Ann", "ann@example.com");
    let bob = register!(app, "Bob", "bob@example.com");

    create_slang!(app, ann, "yolo");
    create_slang!(app, bob, "rizz");
    create_slang!(app, bob, "bet");

    let mine: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/slangs/my-slangs")
            .insert_header(("Authorization", bob.as_str()))
            .to_request(),
    )
    .await;
    assert_eq!(mine.as_array().map(Vec::len), Some(2));

    let board: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/slangs/leaderboard")
            .insert_header(("Authorization", ann.as_str()))
            .to_request(),
    )
    .await;
    assert_eq!(
        board,
        json!([
            { "authorName": "Bob", "slangCount": 2 },
            { "authorName": "Ann", "slangCount": 1 }
        ])
    );
}

#[actix_web::test]
async fn test_blank_slang_is_rejected() {
    let app = test_app!();
    let bearer = register!(app, "Ann", "ann@example.com");

    let resp = test::TestRequest::post()
        .uri("/api/slangs")
        .insert_header(("Authorization", bearer.as_str()))
        .set_json(json!({ "term": "", "meaning": " " }))
        .send_request(&app)
        .await;

    assert_eq!(resp.status(), 422);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(2));
}
