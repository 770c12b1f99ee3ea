//! Password login issuing the session cookie.

use axum::{
    Json,
    extract::Extension,
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::error;

use super::session::{session_cookie, session_response};
use super::state::AppState;
use super::storage::UserStatus;
use super::types::LoginRequest;
use super::utils::{hash_token, normalize_email, unix_now, verify_password};

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session created", body = super::types::SessionResponse),
        (status = 401, description = "Unknown email or wrong password", body = String),
        (status = 403, description = "Email not verified yet", body = String)
    ),
    tag = "auth"
)]
pub async fn login(
    state: Extension<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    let email = normalize_email(&request.email);
    // One generic message for unknown email and wrong password.
    let Some(record) = state.directory().lookup_login(&email).await else {
        return (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()).into_response();
    };
    if !verify_password(&record.password_hash, &request.password) {
        return (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()).into_response();
    }
    if record.status != UserStatus::Active {
        return (
            StatusCode::FORBIDDEN,
            "Email not verified yet".to_string(),
        )
            .into_response();
    }

    let now = unix_now();
    let ttl = state.config().session_ttl_seconds(request.remember_me);
    let token = match state
        .directory()
        .create_session(record.user_id, request.remember_me, ttl, now)
        .await
    {
        Ok(token) => token,
        Err(err) => {
            error!("Failed to create session: {err}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Login failed".to_string())
                .into_response();
        }
    };

    let Some(view) = state
        .directory()
        .lookup_session(&hash_token(&token), now)
        .await
    else {
        error!("Session vanished right after creation");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Login failed".to_string()).into_response();
    };

    let mut response_headers = HeaderMap::new();
    match session_cookie(state.config(), &token, request.remember_me) {
        Ok(cookie) => {
            response_headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Login failed".to_string())
                .into_response();
        }
    }

    (
        StatusCode::OK,
        response_headers,
        Json(session_response(&view)),
    )
        .into_response()
}
