//! Authenticated self-service profile endpoints.
//!
//! Flow Overview:
//! 1) Authenticate via session cookie.
//! 2) Resolve the current user from the directory.
//! 3) Apply allow-listed updates.

use axum::{
    Json,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use super::auth::principal::require_auth;
use super::auth::state::AppState;
use super::auth::storage::UserRecord;
use super::auth::utils::unix_now;

#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub locale: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct MeUpdateRequest {
    pub display_name: Option<String>,
    pub locale: Option<String>,
}

#[utoipa::path(
    get,
    path = "/v1/me",
    responses(
        (status = 200, description = "Return the authenticated user profile.", body = MeResponse),
        (status = 401, description = "Missing or invalid session cookie."),
    ),
    tag = "me"
)]
pub async fn get_me(headers: HeaderMap, state: Extension<Arc<AppState>>) -> impl IntoResponse {
    let principal = match require_auth(&headers, &state).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    match state.directory().profile(principal.user_id).await {
        Some(profile) => (StatusCode::OK, Json(me_response(&profile))).into_response(),
        None => {
            error!("Profile missing for authenticated user");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

#[utoipa::path(
    patch,
    path = "/v1/me",
    request_body = MeUpdateRequest,
    responses(
        (status = 200, description = "Profile updated.", body = MeResponse),
        (status = 400, description = "Invalid update payload."),
        (status = 401, description = "Missing or invalid session cookie."),
    ),
    tag = "me"
)]
pub async fn patch_me(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    Json(request): Json<MeUpdateRequest>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &state).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    let display_name = normalize_optional(request.display_name);
    let locale = normalize_optional(request.locale);
    if display_name.is_none() && locale.is_none() {
        return (StatusCode::BAD_REQUEST, "No updates provided.").into_response();
    }

    match state
        .directory()
        .update_profile(principal.user_id, display_name, locale, unix_now())
        .await
    {
        Some(profile) => (StatusCode::OK, Json(me_response(&profile))).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn me_response(profile: &UserRecord) -> MeResponse {
    MeResponse {
        id: profile.id.to_string(),
        email: profile.email.clone(),
        display_name: profile.display_name.clone(),
        locale: profile.locale.clone(),
        created_at: profile.created_at_unix,
        updated_at: profile.updated_at_unix,
    }
}

/// Trim updates and drop empties so a blank field never overwrites data.
fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::normalize_optional;

    #[test]
    fn normalize_optional_trims_and_drops_empty() {
        assert_eq!(normalize_optional(None), None);
        assert_eq!(normalize_optional(Some("  ".to_string())), None);
        assert_eq!(
            normalize_optional(Some("  Ada ".to_string())),
            Some("Ada".to_string())
        );
    }
}
