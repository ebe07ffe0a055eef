//! Cookie authentication middleware behavior
//!
//! Covers the three request outcomes (anonymous, authenticated, rejected)
//! and the phone-verification gate.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::{test, web, App};

use te_api::{configure_app, AppState};
use te_core::domain::entities::user::{User, UserRole};
use te_core::services::auth::{CookieJwtScheme, SchemeChain};
use te_core::services::token::TokenService;
use te_core::services::verification::VerificationService;
use te_infra::database::memory::InMemoryUserRepository;
use te_infra::dispatch::{ConsoleOtpChannel, DispatchQueue, InMemoryOtpStore};
use te_shared::config::AppConfig;

fn test_state(repo: InMemoryUserRepository) -> web::Data<AppState<InMemoryUserRepository>> {
    let mut config = AppConfig::default();
    config.media.serve_in_debug = false;

    let users = Arc::new(repo);
    let token_service = Arc::new(TokenService::new(config.auth.jwt.clone()));
    let auth_chain = SchemeChain::new().with_scheme(Arc::new(CookieJwtScheme::new(
        token_service.clone(),
        users.clone(),
        config.auth.cookies.access_name.clone(),
    )));
    let (queue, _worker) =
        DispatchQueue::spawn(Arc::new(ConsoleOtpChannel::new()), config.dispatch.clone());
    let verification = Arc::new(VerificationService::new(
        queue,
        Arc::new(InMemoryOtpStore::new()),
        config.dispatch.clone(),
    ));

    web::Data::new(AppState {
        config,
        users,
        token_service,
        auth_chain,
        verification,
        google: None,
    })
}

fn verified_client() -> User {
    let mut user = User::new_client("asha", "asha@example.com", "Asha", "Verma");
    user.phone_number = Some("+919876543210".to_string());
    user.is_phone_verified = true;
    user
}

#[actix_rt::test]
async fn anonymous_request_reaches_public_endpoint() {
    let state = test_state(InMemoryUserRepository::new());
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_rt::test]
async fn anonymous_request_to_protected_endpoint_is_401() {
    let state = test_state(InMemoryUserRepository::new());
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::get()
        .uri("/api/auth/dashboard")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_authenticated");
}

#[actix_rt::test]
async fn valid_cookie_authenticates_the_request() {
    let user = verified_client();
    let state = test_state(InMemoryUserRepository::new().with_user(user.clone()));
    let token = state.token_service.issue_access_token(&user).unwrap();
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::get()
        .uri("/api/auth/dashboard")
        .cookie(Cookie::new("access_token", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["username"], "asha");
}

#[actix_rt::test]
async fn garbage_cookie_is_rejected_with_cause() {
    let state = test_state(InMemoryUserRepository::new());
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::get()
        .uri("/api/auth/dashboard")
        .cookie(Cookie::new("access_token", "not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "token_not_valid");
}

#[actix_rt::test]
async fn expired_cookie_reports_expiry() {
    let user = verified_client();
    let state = test_state(InMemoryUserRepository::new().with_user(user.clone()));

    let mut expired_config = state.config.auth.jwt.clone();
    expired_config.access_token_expiry = -3600;
    let token = TokenService::new(expired_config)
        .issue_access_token(&user)
        .unwrap();

    let app = test::init_service(App::new().configure(configure_app(state))).await;
    let req = test::TestRequest::get()
        .uri("/api/auth/dashboard")
        .cookie(Cookie::new("access_token", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "token_not_valid");
    assert!(body["message"].as_str().unwrap().contains("expired"));
}

#[actix_rt::test]
async fn invalid_cookie_is_rejected_even_on_login() {
    // A presented credential is always validated, regardless of endpoint
    let state = test_state(InMemoryUserRepository::new());
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/token")
        .cookie(Cookie::new("access_token", "garbage"))
        .set_json(serde_json::json!({"username": "asha", "password": "pw"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn unverified_client_is_gated_from_business_endpoints() {
    let mut user = verified_client();
    user.is_phone_verified = false;
    let state = test_state(InMemoryUserRepository::new().with_user(user.clone()));
    let token = state.token_service.issue_access_token(&user).unwrap();
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::get()
        .uri("/api/consultant/clients")
        .cookie(Cookie::new("access_token", token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "phone_unverified");

    // Auth and profile endpoints stay reachable so verification can complete
    let req = test::TestRequest::get()
        .uri("/api/auth/dashboard")
        .cookie(Cookie::new("access_token", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_rt::test]
async fn admin_bypasses_the_phone_gate() {
    let mut admin = User::new_client("root", "root@example.com", "Root", "User");
    admin.role = UserRole::Admin;
    admin.is_phone_verified = false;

    let state = test_state(InMemoryUserRepository::new().with_user(admin.clone()));
    let token = state.token_service.issue_access_token(&admin).unwrap();
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::get()
        .uri("/api/consultant/clients")
        .cookie(Cookie::new("access_token", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    // Past the gate; rejected for role, not verification
    assert_eq!(resp.status(), 403);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "forbidden");
}

#[actix_rt::test]
async fn unknown_route_returns_json_404() {
    let state = test_state(InMemoryUserRepository::new());
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::get().uri("/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
}
