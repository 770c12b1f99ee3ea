//! Client wrappers for the HonorarX auth API. These helpers centralize
//! session-aware requests, keeping auth flows consistent and preventing
//! password leakage in route code.

use crate::{
    app_lib::{
        AppError, get_optional_json_with_credentials, post_empty_with_credentials,
        post_empty_with_credentials_response, post_json, post_json_with_credentials_response,
    },
    features::auth::types::{
        LoginRequest, PasswordResetConfirmRequest, PasswordResetRequest,
        ResendVerificationRequest, SignupRequest, UserSession, VerifyEmailRequest,
    },
};

/// Create an account; the server queues the verification email.
pub async fn signup(request: &SignupRequest) -> Result<(), AppError> {
    post_json("/v1/auth/signup", request).await
}

/// Check credentials and let the server set the `HttpOnly` session cookie.
pub async fn login(request: &LoginRequest) -> Result<UserSession, AppError> {
    post_json_with_credentials_response("/v1/auth/login", request).await
}

/// Verify an email token after the user follows the link.
/// Must never log the token.
pub async fn verify_email(request: &VerifyEmailRequest) -> Result<(), AppError> {
    post_json("/v1/auth/verify-email", request).await
}

/// Request a new verification email without leaking account existence.
pub async fn resend_verification(request: &ResendVerificationRequest) -> Result<(), AppError> {
    post_json("/v1/auth/resend-verification", request).await
}

/// Request a password-reset email without leaking account existence.
pub async fn request_password_reset(request: &PasswordResetRequest) -> Result<(), AppError> {
    post_json("/v1/auth/password-reset/request", request).await
}

/// Set a new password using the emailed token.
pub async fn confirm_password_reset(
    request: &PasswordResetConfirmRequest,
) -> Result<(), AppError> {
    post_json("/v1/auth/password-reset/confirm", request).await
}

/// Fetches the current session using cookie-based auth.
/// Returns `None` when the session is missing or expired.
pub async fn fetch_session() -> Result<Option<UserSession>, AppError> {
    get_optional_json_with_credentials("/v1/auth/session").await
}

/// Extend the current session ("stay signed in" from the expiry notice).
pub async fn refresh_session() -> Result<UserSession, AppError> {
    post_empty_with_credentials_response("/v1/auth/refresh").await
}

/// Clears the current session on the server.
/// Uses cookie-based auth to invalidate the server-side session.
pub async fn logout() -> Result<(), AppError> {
    post_empty_with_credentials("/v1/auth/logout").await
}
