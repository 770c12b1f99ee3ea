//! Signup endpoint: create a pending user and queue the verification email.

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use std::sync::Arc;
use tracing::error;

use super::state::AppState;
use super::storage::SignupOutcome;
use super::types::SignupRequest;
use super::utils::{acceptable_password, hash_password, normalize_email, unix_now, valid_email};

#[utoipa::path(
    post,
    path = "/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 204, description = "Account created; verification email queued"),
        (status = 400, description = "Invalid email or password", body = String),
        (status = 409, description = "Email already registered", body = String)
    ),
    tag = "auth"
)]
pub async fn signup(
    state: Extension<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> impl IntoResponse {
    let email = normalize_email(&request.email);
    if !valid_email(&email) {
        return (StatusCode::BAD_REQUEST, "Invalid email".to_string()).into_response();
    }
    if !acceptable_password(&request.password) {
        return (
            StatusCode::BAD_REQUEST,
            "Password must be at least 8 characters".to_string(),
        )
            .into_response();
    }

    let password_hash = match hash_password(&request.password) {
        Ok(hash) => hash,
        Err(err) => {
            error!("Failed to hash signup password: {err}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Signup failed".to_string())
                .into_response();
        }
    };

    match state
        .directory()
        .insert_user_and_verification(&email, password_hash, state.config(), unix_now())
        .await
    {
        Ok(SignupOutcome::Created) => StatusCode::NO_CONTENT.into_response(),
        Ok(SignupOutcome::Conflict) => (
            StatusCode::CONFLICT,
            "Email already registered".to_string(),
        )
            .into_response(),
        Err(err) => {
            error!("Failed to create user: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Signup failed".to_string()).into_response()
        }
    }
}
