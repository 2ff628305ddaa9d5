//! Handler integration tests over in-memory repositories.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, Error, test, web};
use serde_json::{Value, json};

use mesto_core::ports::{PasswordService, TokenService};
use mesto_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};

use super::configure_routes;
use crate::state::AppState;

fn app_data() -> (
    web::Data<AppState>,
    web::Data<Arc<dyn TokenService>>,
    web::Data<Arc<dyn PasswordService>>,
) {
    let jwt = JwtConfig {
        secret: "handler-test-secret".to_string(),
        ..JwtConfig::default()
    };
    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(jwt));
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    (
        web::Data::new(AppState::in_memory()),
        web::Data::new(token_service),
        web::Data::new(password_service),
    )
}

macro_rules! spawn_app {
    () => {{
        let (state, tokens, passwords) = app_data();
        test::init_service(
            App::new()
                .app_data(state)
                .app_data(tokens)
                .app_data(passwords)
                .configure(configure_routes),
        )
        .await
    }};
}

/// Register an account and sign in, returning the bearer token.
async fn register<S, B>(app: &S, email: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let resp = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/signup")
            .set_json(json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/signin")
            .set_json(json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    body["token"].as_str().expect("token in body").to_string()
}

/// Create a card as the given user, returning its id.
async fn create_card<S, B>(app: &S, token: &str, name: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let resp = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/cards")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "name": name, "link": "https://example.com/photo.jpg" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    body["data"]["_id"].as_str().expect("card id").to_string()
}

#[actix_web::test]
async fn health_check_is_public() {
    let app = spawn_app!();

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn signup_then_signin_returns_token() {
    let app = spawn_app!();

    let token = register(&app, "anna@example.com", "correct-horse").await;

    assert!(!token.is_empty());
}

#[actix_web::test]
async fn signup_never_echoes_the_password() {
    let app = spawn_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/signup")
            .set_json(json!({ "email": "anna@example.com", "password": "correct-horse" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"].get("password").is_none());
    assert_eq!(body["data"]["email"], "anna@example.com");
}

#[actix_web::test]
async fn duplicate_signup_yields_conflict() {
    let app = spawn_app!();
    register(&app, "anna@example.com", "correct-horse").await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/signup")
            .set_json(json!({ "email": "anna@example.com", "password": "another-pass" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].is_string());
}

#[actix_web::test]
async fn signup_with_invalid_email_is_bad_request() {
    let app = spawn_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/signup")
            .set_json(json!({ "email": "not-an-email", "password": "correct-horse" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn signin_with_wrong_password_is_unauthorized() {
    let app = spawn_app!();
    register(&app, "anna@example.com", "correct-horse").await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/signin")
            .set_json(json!({ "email": "anna@example.com", "password": "wrong-password" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn protected_route_without_token_is_unauthorized() {
    let app = spawn_app!();

    // A perfectly valid payload does not help without a token.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/cards")
            .set_json(json!({ "name": "Baikal", "link": "https://example.com/b.jpg" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/users")
            .insert_header(("Authorization", "Bearer not-a-real-token"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn short_name_patch_is_rejected_and_profile_unchanged() {
    let app = spawn_app!();
    let token = register(&app, "anna@example.com", "correct-horse").await;

    let resp = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri("/users/me")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "name": "A", "about": "Photographer" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/users/me")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["name"], mesto_core::domain::user::DEFAULT_NAME);
}

#[actix_web::test]
async fn profile_and_avatar_updates_apply_to_caller() {
    let app = spawn_app!();
    let token = register(&app, "anna@example.com", "correct-horse").await;

    let resp = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri("/users/me")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "name": "Anna", "about": "Photographer" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri("/users/me/avatar")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "avatar": "https://example.com/anna.png" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["name"], "Anna");
    assert_eq!(body["data"]["avatar"], "https://example.com/anna.png");
}

#[actix_web::test]
async fn liking_twice_keeps_one_like() {
    let app = spawn_app!();
    let token = register(&app, "anna@example.com", "correct-horse").await;
    let card_id = create_card(&app, &token, "Baikal").await;

    for _ in 0..2 {
        let resp = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/cards/{}/likes", card_id))
                .insert_header(("Authorization", format!("Bearer {}", token)))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/cards")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"][0]["likes"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn unlike_removes_the_caller_from_the_like_set() {
    let app = spawn_app!();
    let token = register(&app, "anna@example.com", "correct-horse").await;
    let card_id = create_card(&app, &token, "Baikal").await;

    test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/cards/{}/likes", card_id))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/cards/{}/likes", card_id))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["likes"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn only_the_owner_can_delete_a_card() {
    let app = spawn_app!();
    let owner_token = register(&app, "owner@example.com", "correct-horse").await;
    let other_token = register(&app, "other@example.com", "correct-horse").await;
    let card_id = create_card(&app, &owner_token, "Baikal").await;

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/cards/{}", card_id))
            .insert_header(("Authorization", format!("Bearer {}", other_token)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/cards/{}", card_id))
            .insert_header(("Authorization", format!("Bearer {}", owner_token)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/cards")
            .insert_header(("Authorization", format!("Bearer {}", owner_token)))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn malformed_card_id_is_bad_request() {
    let app = spawn_app!();
    let token = register(&app, "anna@example.com", "correct-horse").await;

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/cards/not-a-hex-id/likes")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn malformed_user_id_is_bad_request() {
    let app = spawn_app!();
    let token = register(&app, "anna@example.com", "correct-horse").await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/users/not-a-hex-id")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unknown_user_id_is_not_found() {
    let app = spawn_app!();
    let token = register(&app, "anna@example.com", "correct-horse").await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/users/507f1f77bcf86cd799439011")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
