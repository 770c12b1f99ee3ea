//! Email verification endpoints.

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use std::sync::Arc;
use tracing::error;

use super::state::AppState;
use super::storage::ResendOutcome;
use super::types::{ResendVerificationRequest, VerifyEmailRequest};
use super::utils::{hash_token, normalize_email, unix_now, valid_email};

/// Verify the email link by consuming the hashed token and activating the user.
#[utoipa::path(
    post,
    path = "/v1/auth/verify-email",
    request_body = VerifyEmailRequest,
    responses(
        (status = 204, description = "Email verified"),
        (status = 400, description = "Invalid/expired token", body = String)
    ),
    tag = "auth"
)]
pub async fn verify_email(
    state: Extension<Arc<AppState>>,
    Json(request): Json<VerifyEmailRequest>,
) -> impl IntoResponse {
    let token = request.token.trim();
    if token.is_empty() {
        return (StatusCode::BAD_REQUEST, "Missing token".to_string()).into_response();
    }

    // Hash the token before lookup; raw tokens are never stored server-side.
    let token_hash = hash_token(token);
    if state
        .directory()
        .consume_verification_token(&token_hash, unix_now())
        .await
    {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (StatusCode::BAD_REQUEST, "Invalid token".to_string()).into_response()
    }
}

/// Resend a verification email (always returns 204 to avoid user enumeration).
#[utoipa::path(
    post,
    path = "/v1/auth/resend-verification",
    request_body = ResendVerificationRequest,
    responses(
        (status = 204, description = "Resend accepted")
    ),
    tag = "auth"
)]
pub async fn resend_verification(
    state: Extension<Arc<AppState>>,
    Json(request): Json<ResendVerificationRequest>,
) -> impl IntoResponse {
    let email = normalize_email(&request.email);
    if !valid_email(&email) {
        // Always return 204 for invalid emails to avoid account probing.
        return StatusCode::NO_CONTENT.into_response();
    }

    match state
        .directory()
        .enqueue_resend_verification(&email, state.config(), unix_now())
        .await
    {
        Ok(ResendOutcome::Queued | ResendOutcome::Cooldown | ResendOutcome::Noop) => {
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => {
            error!("Failed to enqueue resend: {err}");
            // Still opaque to the caller.
            StatusCode::NO_CONTENT.into_response()
        }
    }
}
