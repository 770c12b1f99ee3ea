//! Request and response types for auth-related API calls. These payloads
//! carry passwords and verification tokens, so they must never be logged.

use serde::{Deserialize, Serialize};
use session_guard::SessionSnapshot;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResendVerificationRequest {
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PasswordResetConfirmRequest {
    pub token: String,
    pub new_password: String,
}

/// Session summary returned by the API to hydrate auth state.
/// This mirrors cookie-backed session state and contains no secrets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
    /// Absolute session expiry, Unix seconds.
    pub expires_at: i64,
    pub remember_me: bool,
}

impl UserSession {
    /// The shape the session guards consume.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            subject: self.user_id.clone(),
            expires_at: self.expires_at,
            remember_me: self.remember_me,
        }
    }
}
