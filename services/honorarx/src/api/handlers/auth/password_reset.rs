//! Password reset: request a link, confirm with the token.

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use std::sync::Arc;
use tracing::error;

use super::state::AppState;
use super::types::{PasswordResetConfirmRequest, PasswordResetRequest};
use super::utils::{
    acceptable_password, hash_password, hash_token, normalize_email, unix_now, valid_email,
};

/// Queue a password-reset email (always 204 to avoid account probing).
#[utoipa::path(
    post,
    path = "/v1/auth/password-reset/request",
    request_body = PasswordResetRequest,
    responses(
        (status = 204, description = "Reset accepted")
    ),
    tag = "auth"
)]
pub async fn request_reset(
    state: Extension<Arc<AppState>>,
    Json(request): Json<PasswordResetRequest>,
) -> impl IntoResponse {
    let email = normalize_email(&request.email);
    if !valid_email(&email) {
        return StatusCode::NO_CONTENT.into_response();
    }

    if let Err(err) = state
        .directory()
        .enqueue_password_reset(&email, state.config(), unix_now())
        .await
    {
        error!("Failed to enqueue password reset: {err}");
    }
    // Queued, cooldown, unknown email, and internal errors all look the same.
    StatusCode::NO_CONTENT.into_response()
}

/// Consume the reset token and set the new password. All of the user's
/// sessions are invalidated on success.
#[utoipa::path(
    post,
    path = "/v1/auth/password-reset/confirm",
    request_body = PasswordResetConfirmRequest,
    responses(
        (status = 204, description = "Password updated"),
        (status = 400, description = "Invalid token or password", body = String)
    ),
    tag = "auth"
)]
pub async fn confirm_reset(
    state: Extension<Arc<AppState>>,
    Json(request): Json<PasswordResetConfirmRequest>,
) -> impl IntoResponse {
    let token = request.token.trim();
    if token.is_empty() {
        return (StatusCode::BAD_REQUEST, "Missing token".to_string()).into_response();
    }
    if !acceptable_password(&request.new_password) {
        return (
            StatusCode::BAD_REQUEST,
            "Password must be at least 8 characters".to_string(),
        )
            .into_response();
    }

    let password_hash = match hash_password(&request.new_password) {
        Ok(hash) => hash,
        Err(err) => {
            error!("Failed to hash reset password: {err}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Reset failed".to_string())
                .into_response();
        }
    };

    if state
        .directory()
        .consume_reset_token(&hash_token(token), password_hash, unix_now())
        .await
    {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (StatusCode::BAD_REQUEST, "Invalid token".to_string()).into_response()
    }
}
