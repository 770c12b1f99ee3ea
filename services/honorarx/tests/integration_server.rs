//! Route-level tests driving the router with in-process requests.

use std::sync::Arc;

use axum::{
    Extension, Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use tower::ServiceExt;

use honorarx::api::handlers::auth::{AppState, AuthConfig};

fn app() -> (Router, Arc<AppState>) {
    let state = AppState::shared(AuthConfig::new("http://localhost:8081".to_string()));
    let (router, _openapi) = honorarx::api::router().split_for_parts();
    (router.layer(Extension(state.clone())), state)
}

fn json_post(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _state) = app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("X-App"));
}

#[tokio::test]
async fn signup_then_duplicate_conflicts() {
    let (app, _state) = app();

    let response = app
        .clone()
        .oneshot(json_post(
            "/v1/auth/signup",
            r#"{"email":"ada@example.com","password":"long-enough"}"#,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(json_post(
            "/v1/auth/signup",
            r#"{"email":"Ada@Example.com","password":"long-enough"}"#,
        ))
        .await
        .expect("response");
    // Same address with different case is the same account.
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn signup_rejects_bad_input() {
    let (app, _state) = app();

    let response = app
        .clone()
        .oneshot(json_post(
            "/v1/auth/signup",
            r#"{"email":"not-an-email","password":"long-enough"}"#,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_post(
            "/v1/auth/signup",
            r#"{"email":"ada@example.com","password":"short"}"#,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_requires_verified_account() {
    let (app, _state) = app();

    let response = app
        .clone()
        .oneshot(json_post(
            "/v1/auth/signup",
            r#"{"email":"ada@example.com","password":"long-enough"}"#,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Wrong password: generic 401.
    let response = app
        .clone()
        .oneshot(json_post(
            "/v1/auth/login",
            r#"{"email":"ada@example.com","password":"wrong-password"}"#,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Right password but unverified: 403.
    let response = app
        .clone()
        .oneshot(json_post(
            "/v1/auth/login",
            r#"{"email":"ada@example.com","password":"long-enough"}"#,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Unknown account: same generic 401 as a wrong password.
    let response = app
        .oneshot(json_post(
            "/v1/auth/login",
            r#"{"email":"nobody@example.com","password":"whatever1"}"#,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_read_without_cookie_is_no_content() {
    let (app, _state) = app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/auth/session")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn logout_is_idempotent_and_clears_cookie() {
    let (app, _state) = app();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/auth/logout")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .expect("set-cookie header");
        assert!(cookie.contains("honorarx_session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}

#[tokio::test]
async fn resend_and_reset_requests_are_opaque() {
    let (app, _state) = app();

    let response = app
        .clone()
        .oneshot(json_post(
            "/v1/auth/resend-verification",
            r#"{"email":"nobody@example.com"}"#,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(json_post(
            "/v1/auth/password-reset/request",
            r#"{"email":"nobody@example.com"}"#,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn reset_confirm_rejects_unknown_token() {
    let (app, _state) = app();
    let response = app
        .oneshot(json_post(
            "/v1/auth/password-reset/confirm",
            r#"{"token":"bogus","new_password":"long-enough"}"#,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn contact_validates_and_accepts() {
    let (app, _state) = app();

    let response = app
        .clone()
        .oneshot(json_post(
            "/v1/contact",
            r#"{"name":"Ada","email":"ada@example.com","message":"Hello there"}"#,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(json_post(
            "/v1/contact",
            r#"{"name":"","email":"ada@example.com","message":"Hi"}"#,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn profile_requires_session() {
    let (app, _state) = app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/me")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
