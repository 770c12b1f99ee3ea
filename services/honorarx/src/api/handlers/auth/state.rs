//! Auth configuration and shared application state.

use std::sync::Arc;

use super::storage::Directory;

const DEFAULT_EMAIL_TOKEN_TTL_SECONDS: i64 = 30 * 60;
const DEFAULT_RESET_TOKEN_TTL_SECONDS: i64 = 30 * 60;
const DEFAULT_RESEND_COOLDOWN_SECONDS: i64 = 60;
const DEFAULT_SESSION_TTL_SECONDS: i64 = 2 * 60 * 60;
const DEFAULT_REMEMBER_ME_TTL_SECONDS: i64 = 30 * 24 * 60 * 60;
const DEFAULT_CONTACT_INBOX: &str = "support@honorarx.dev";

#[derive(Clone, Debug)]
pub struct AuthConfig {
    frontend_base_url: String,
    email_token_ttl_seconds: i64,
    reset_token_ttl_seconds: i64,
    resend_cooldown_seconds: i64,
    session_ttl_seconds: i64,
    remember_me_ttl_seconds: i64,
    contact_inbox: String,
}

impl AuthConfig {
    #[must_use]
    pub fn new(frontend_base_url: String) -> Self {
        Self {
            frontend_base_url,
            email_token_ttl_seconds: DEFAULT_EMAIL_TOKEN_TTL_SECONDS,
            reset_token_ttl_seconds: DEFAULT_RESET_TOKEN_TTL_SECONDS,
            resend_cooldown_seconds: DEFAULT_RESEND_COOLDOWN_SECONDS,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            remember_me_ttl_seconds: DEFAULT_REMEMBER_ME_TTL_SECONDS,
            contact_inbox: DEFAULT_CONTACT_INBOX.to_string(),
        }
    }

    #[must_use]
    pub fn with_email_token_ttl_seconds(mut self, seconds: i64) -> Self {
        self.email_token_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_reset_token_ttl_seconds(mut self, seconds: i64) -> Self {
        self.reset_token_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_resend_cooldown_seconds(mut self, seconds: i64) -> Self {
        self.resend_cooldown_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_remember_me_ttl_seconds(mut self, seconds: i64) -> Self {
        self.remember_me_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_contact_inbox(mut self, inbox: String) -> Self {
        self.contact_inbox = inbox;
        self
    }

    pub(crate) fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }

    pub(super) fn email_token_ttl_seconds(&self) -> i64 {
        self.email_token_ttl_seconds
    }

    pub(super) fn reset_token_ttl_seconds(&self) -> i64 {
        self.reset_token_ttl_seconds
    }

    pub(super) fn resend_cooldown_seconds(&self) -> i64 {
        self.resend_cooldown_seconds
    }

    /// TTL for the session picked at login: remember-me sessions survive
    /// browser restarts, ordinary sessions expire after two hours.
    pub(crate) fn session_ttl_seconds(&self, remember_me: bool) -> i64 {
        if remember_me {
            self.remember_me_ttl_seconds
        } else {
            self.session_ttl_seconds
        }
    }

    pub(crate) fn contact_inbox(&self) -> &str {
        &self.contact_inbox
    }

    /// Only mark cookies secure when the frontend is served over HTTPS.
    pub(super) fn session_cookie_secure(&self) -> bool {
        self.frontend_base_url.starts_with("https://")
    }
}

/// Shared state handed to every handler: config plus the in-memory
/// directory. Persistence is deliberately opaque to handlers.
pub struct AppState {
    config: AuthConfig,
    directory: Directory,
}

impl AppState {
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            directory: Directory::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub(crate) fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Convenience for server wiring and tests.
    #[must_use]
    pub fn shared(config: AuthConfig) -> Arc<Self> {
        Arc::new(Self::new(config))
    }
}

#[cfg(test)]
mod tests {
    use super::{AppState, AuthConfig};

    #[test]
    fn auth_config_defaults_and_overrides() {
        let config = AuthConfig::new("https://honorarx.dev".to_string());

        assert_eq!(config.frontend_base_url(), "https://honorarx.dev");
        assert_eq!(
            config.email_token_ttl_seconds(),
            super::DEFAULT_EMAIL_TOKEN_TTL_SECONDS
        );
        assert_eq!(
            config.resend_cooldown_seconds(),
            super::DEFAULT_RESEND_COOLDOWN_SECONDS
        );
        assert_eq!(config.session_ttl_seconds(false), 2 * 60 * 60);
        assert_eq!(config.session_ttl_seconds(true), 30 * 24 * 60 * 60);
        assert!(config.session_cookie_secure());

        let config = config
            .with_email_token_ttl_seconds(120)
            .with_reset_token_ttl_seconds(60)
            .with_resend_cooldown_seconds(30)
            .with_session_ttl_seconds(600)
            .with_remember_me_ttl_seconds(1_200)
            .with_contact_inbox("inbox@test".to_string());

        assert_eq!(config.email_token_ttl_seconds(), 120);
        assert_eq!(config.reset_token_ttl_seconds(), 60);
        assert_eq!(config.resend_cooldown_seconds(), 30);
        assert_eq!(config.session_ttl_seconds(false), 600);
        assert_eq!(config.session_ttl_seconds(true), 1_200);
        assert_eq!(config.contact_inbox(), "inbox@test");
    }

    #[test]
    fn insecure_frontend_disables_secure_cookie() {
        let config = AuthConfig::new("http://localhost:8081".to_string());
        assert!(!config.session_cookie_secure());
    }

    #[test]
    fn app_state_exposes_directory() {
        let state = AppState::new(AuthConfig::new("http://localhost:8081".to_string()));
        assert_eq!(state.config().frontend_base_url(), "http://localhost:8081");
        let _ = state.directory();
    }
}
