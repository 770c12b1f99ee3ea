//! Client for the authenticated profile endpoints.

use crate::app_lib::{AppError, get_json_with_credentials, patch_json_with_credentials};
use crate::features::profile::types::{Profile, ProfileUpdate};

pub async fn fetch_profile() -> Result<Profile, AppError> {
    get_json_with_credentials("/v1/me").await
}

pub async fn update_profile(update: &ProfileUpdate) -> Result<Profile, AppError> {
    patch_json_with_credentials("/v1/me", update).await
}
