//! Contact form endpoint; messages land in the email outbox.

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::auth::state::AppState;
use super::auth::utils::{normalize_email, unix_now, valid_email};

const MAX_MESSAGE_CHARS: usize = 4_000;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/v1/contact",
    request_body = ContactRequest,
    responses(
        (status = 204, description = "Message queued"),
        (status = 400, description = "Invalid payload", body = String)
    ),
    tag = "contact"
)]
pub async fn contact(
    state: Extension<Arc<AppState>>,
    Json(request): Json<ContactRequest>,
) -> impl IntoResponse {
    let name = request.name.trim();
    let message = request.message.trim();
    let reply_to = normalize_email(&request.email);
    if name.is_empty() || message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            "Name and message are required".to_string(),
        )
            .into_response();
    }
    if !valid_email(&reply_to) {
        return (StatusCode::BAD_REQUEST, "Invalid email".to_string()).into_response();
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return (StatusCode::BAD_REQUEST, "Message too long".to_string()).into_response();
    }

    state
        .directory()
        .enqueue_contact(state.config(), name, &reply_to, message, unix_now())
        .await;
    StatusCode::NO_CONTENT.into_response()
}
