//! In-process router tests.
//!
//! These exercise every path that must fail before touching storage, so
//! they run without a database: the pool is created lazily against an
//! unreachable address and any query attempt would surface as a 500.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use tangerine_api::config::ApiConfig;
use tangerine_api::routes;
use tangerine_api::services::token::Claims;
use tangerine_api::state::AppState;

const SECRET: &str = "router-test-signing-key-0123456789";

fn test_app() -> Router {
    // Lazy pool against an unreachable port: a query attempt errors fast
    let pool = PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_millis(500))
        .connect_lazy("postgres://127.0.0.1:1/unreachable")
        .unwrap();

    let config = ApiConfig {
        database_url: SecretString::from("postgres://127.0.0.1:1/unreachable"),
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
        port: 0,
        jwt_secret: SecretString::from(SECRET),
        sentry_dsn: None,
    };

    let state = AppState::new(config, pool);
    Router::new().merge(routes::routes()).with_state(state)
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

fn post_json(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn bearer(request: Request<Body>, token: &str) -> Request<Body> {
    let (mut parts, body) = request.into_parts();
    parts.headers.insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().unwrap(),
    );
    Request::from_parts(parts, body)
}

/// Sign claims with the test secret, bypassing `token::issue` so tests can
/// control the expiry.
#[allow(clippy::cast_sign_loss)]
fn signed_token(sub: &str, exp_offset: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        iat: now as usize,
        exp: (now + exp_offset) as usize,
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

// ============================================================================
// Authentication edges (401 before any storage access)
// ============================================================================

#[tokio::test]
async fn cart_view_without_token_is_unauthorized() {
    let response = test_app().oneshot(get("/shopcart")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cart_add_without_token_is_unauthorized() {
    // Auth runs before body validation: even a valid body is rejected
    let response = test_app()
        .oneshot(post_json("/shopcart", r#"{"product_id": 1}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn confirm_order_without_token_is_unauthorized() {
    let response = test_app()
        .oneshot(post_json(
            "/confirm-order",
            r#"{"tax_id": "12345678900", "payment_method": "boleto"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let response = test_app()
        .oneshot(bearer(get("/shopcart"), "not-a-token"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_auth_scheme_is_unauthorized() {
    let mut request = get("/shopcart");
    request.headers_mut().insert(
        header::AUTHORIZATION,
        "Basic dXNlcjpwYXNz".parse().unwrap(),
    );

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    // Expired an hour ago, well past the verifier's leeway
    let token = signed_token("1", -3600);

    let response = test_app()
        .oneshot(bearer(get("/shopcart"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_other_secret_is_unauthorized() {
    let claims = Claims::for_user(tangerine_core::UserId::new(1));
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"some-other-secret"),
    )
    .unwrap();

    let response = test_app()
        .oneshot(bearer(get("/shopcart"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_numeric_subject_is_unauthorized() {
    let token = signed_token("robot", 3600);

    let response = test_app()
        .oneshot(bearer(get("/shopcart"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Schema validation edges (400 before any storage access)
// ============================================================================

#[tokio::test]
async fn sign_up_empty_body_is_bad_request() {
    let response = test_app()
        .oneshot(post_json("/sign-up", "{}"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sign_up_missing_name_is_bad_request() {
    let response = test_app()
        .oneshot(post_json(
            "/sign-up",
            r#"{"email": "kid@example.com", "password": "123456"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sign_up_short_name_is_bad_request() {
    let response = test_app()
        .oneshot(post_json(
            "/sign-up",
            r#"{"name": "ab", "email": "kid@example.com", "password": "123456"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sign_up_invalid_email_is_bad_request() {
    let response = test_app()
        .oneshot(post_json(
            "/sign-up",
            r#"{"name": "Kid Tester", "email": "kid.example.com", "password": "123456"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sign_up_short_password_is_bad_request() {
    let response = test_app()
        .oneshot(post_json(
            "/sign-up",
            r#"{"name": "Kid Tester", "email": "kid@example.com", "password": "12345"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sign_up_non_json_body_is_bad_request() {
    let response = test_app()
        .oneshot(post_json("/sign-up", "name=Kid"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sign_in_missing_password_is_bad_request() {
    let response = test_app()
        .oneshot(post_json("/sign-in", r#"{"email": "kid@example.com"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sign_in_invalid_email_is_bad_request() {
    let response = test_app()
        .oneshot(post_json(
            "/sign-in",
            r#"{"email": "kid.example.com", "password": "123456"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = test_app().oneshot(get("/admin")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
