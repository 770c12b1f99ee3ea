//! Session-cookie authentication for self-service endpoints.

use axum::http::{HeaderMap, StatusCode};
use uuid::Uuid;

use super::session::extract_session_token;
use super::state::AppState;
use super::utils::{hash_token, unix_now};

/// Authenticated caller resolved from the session cookie.
pub(crate) struct Principal {
    pub(crate) user_id: Uuid,
    pub(crate) email: String,
}

/// Resolve the caller or fail with 401.
pub(crate) async fn require_auth(
    headers: &HeaderMap,
    state: &AppState,
) -> Result<Principal, StatusCode> {
    let Some(token) = extract_session_token(headers) else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    let token_hash = hash_token(&token);
    match state
        .directory()
        .lookup_session(&token_hash, unix_now())
        .await
    {
        Some(view) => Ok(Principal {
            user_id: view.user_id,
            email: view.email,
        }),
        None => Err(StatusCode::UNAUTHORIZED),
    }
}
