//! Session endpoints: read, refresh, and logout.

use axum::{
    Json,
    extract::Extension,
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{AUTHORIZATION, InvalidHeaderValue, SET_COOKIE},
    },
    response::IntoResponse,
};
use std::sync::Arc;

use super::state::{AppState, AuthConfig};
use super::storage::SessionView;
use super::types::SessionResponse;
use super::utils::{hash_token, unix_now};

const SESSION_COOKIE_NAME: &str = "honorarx_session";

#[utoipa::path(
    get,
    path = "/v1/auth/session",
    responses(
        (status = 200, description = "Session is active", body = SessionResponse),
        (status = 204, description = "No active session")
    ),
    tag = "auth"
)]
pub async fn session(headers: HeaderMap, state: Extension<Arc<AppState>>) -> impl IntoResponse {
    // Missing cookies are treated as "no session" to avoid leaking auth state.
    let Some(token) = extract_session_token(&headers) else {
        return StatusCode::NO_CONTENT.into_response();
    };
    let token_hash = hash_token(&token);
    match state
        .directory()
        .lookup_session(&token_hash, unix_now())
        .await
    {
        Some(view) => (StatusCode::OK, Json(session_response(&view))).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/v1/auth/refresh",
    responses(
        (status = 200, description = "Session extended", body = SessionResponse),
        (status = 401, description = "No active session to extend")
    ),
    tag = "auth"
)]
pub async fn refresh(headers: HeaderMap, state: Extension<Arc<AppState>>) -> impl IntoResponse {
    let Some(token) = extract_session_token(&headers) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    let token_hash = hash_token(&token);
    let now = unix_now();
    let Some(view) = state.directory().lookup_session(&token_hash, now).await else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    let ttl = state.config().session_ttl_seconds(view.remember_me);
    let Some(view) = state
        .directory()
        .extend_session(&token_hash, ttl, now)
        .await
    else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    // Re-issue the cookie so its Max-Age tracks the new expiry.
    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = session_cookie(state.config(), &token, view.remember_me) {
        response_headers.insert(SET_COOKIE, cookie);
    }
    (
        StatusCode::OK,
        response_headers,
        Json(session_response(&view)),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tag = "auth"
)]
pub async fn logout(headers: HeaderMap, state: Extension<Arc<AppState>>) -> impl IntoResponse {
    if let Some(token) = extract_session_token(&headers) {
        let token_hash = hash_token(&token);
        state.directory().delete_session(&token_hash).await;
    }

    // Always clear the cookie, even if the session record was missing.
    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = clear_session_cookie(state.config()) {
        response_headers.insert(SET_COOKIE, cookie);
    }
    (StatusCode::NO_CONTENT, response_headers).into_response()
}

pub(super) fn session_response(view: &SessionView) -> SessionResponse {
    SessionResponse {
        user_id: view.user_id.to_string(),
        email: view.email.clone(),
        display_name: view.display_name.clone(),
        expires_at: view.expires_at_unix,
        remember_me: view.remember_me,
    }
}

/// Build a secure `HttpOnly` cookie for the session token.
pub(super) fn session_cookie(
    config: &AuthConfig,
    token: &str,
    remember_me: bool,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = config.session_ttl_seconds(remember_me);
    let secure = config.session_cookie_secure();
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

fn clear_session_cookie(config: &AuthConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = config.session_cookie_secure();
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_bearer_token(headers) {
        return Some(token);
    }
    let header = headers.get(axum::http::header::COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE_NAME {
            return Some(val.to_string());
        }
    }
    None
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};

    use super::{AuthConfig, extract_session_token, session_cookie};

    #[test]
    fn extract_token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            HeaderValue::from_static("theme=dark; honorarx_session=abc123; other=x"),
        );
        assert_eq!(extract_session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn bearer_token_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
        headers.insert(
            axum::http::header::COOKIE,
            HeaderValue::from_static("honorarx_session=abc123"),
        );
        assert_eq!(extract_session_token(&headers).as_deref(), Some("tok"));
    }

    #[test]
    fn empty_bearer_falls_back_to_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        headers.insert(
            axum::http::header::COOKIE,
            HeaderValue::from_static("honorarx_session=abc123"),
        );
        assert_eq!(extract_session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_headers_yield_none() {
        let headers = HeaderMap::new();
        assert_eq!(extract_session_token(&headers), None);
    }

    #[test]
    fn session_cookie_carries_ttl_and_secure_flag() {
        let config = AuthConfig::new("https://honorarx.dev".to_string())
            .with_session_ttl_seconds(7_200)
            .with_remember_me_ttl_seconds(600_000);

        let cookie = session_cookie(&config, "tok", false).expect("cookie");
        let value = cookie.to_str().expect("ascii");
        assert!(value.contains("honorarx_session=tok"));
        assert!(value.contains("Max-Age=7200"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("Secure"));

        let cookie = session_cookie(&config, "tok", true).expect("cookie");
        assert!(cookie.to_str().expect("ascii").contains("Max-Age=600000"));
    }

    #[test]
    fn insecure_frontend_omits_secure_attribute() {
        let config = AuthConfig::new("http://localhost:8081".to_string());
        let cookie = session_cookie(&config, "tok", false).expect("cookie");
        assert!(!cookie.to_str().expect("ascii").contains("Secure"));
    }
}
