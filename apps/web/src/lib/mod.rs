//! Shared frontend utilities for API access, configuration, and errors.
//!
//! ## Session model
//!
//! The API authenticates with an `HttpOnly` session cookie; this app never
//! sees the token. What it does keep client-side are session *markers*
//! (last activity, session start, remember-me) that drive the inactivity
//! and expiry guards in `features::session`. Centralizing the HTTP helpers
//! here keeps network behavior consistent and avoids duplicated logic in
//! routes and features.

pub(crate) mod api;
pub(crate) mod config;
pub(crate) mod errors;

pub(crate) const GIT_SHA: &str = env!("HONORARX_WEB_GIT_SHA");

pub(crate) use api::{
    get_json_with_credentials, get_optional_json_with_credentials, patch_json_with_credentials,
    post_empty_with_credentials, post_empty_with_credentials_response, post_json,
    post_json_with_credentials_response,
};
pub(crate) use errors::AppError;
