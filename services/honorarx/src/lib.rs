//! # HonorarX API
//!
//! `honorarx` is the backend for the HonorarX invoicing web application. It
//! owns user accounts, cookie-backed sessions, email verification, password
//! resets, profile self-service, and the contact inbox.
//!
//! ## Sessions
//!
//! Login issues a random session token delivered as an `HttpOnly` cookie;
//! only a SHA-256 hash of the token is kept server-side. Sessions carry an
//! absolute expiry and a remember-me flag: remember-me sessions live for
//! weeks, ordinary sessions for two hours. The frontend reads
//! `GET /v1/auth/session` to drive its expiry and inactivity timers and may
//! extend a session via `POST /v1/auth/refresh`. Logout is idempotent and
//! always clears the cookie, even when no session record exists.
//!
//! ## Email delivery
//!
//! Signup, resend, password reset, and the contact form enqueue messages in
//! an outbox drained by a background worker with retry and backoff. Delivery
//! itself is behind the `EmailSender` trait; the default sender logs instead
//! of sending, which is what local development wants.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn git_commit_hash_is_hex_or_unknown() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(GIT_COMMIT_HASH.len() >= 7);
    }

    #[test]
    fn app_user_agent_carries_name_and_version() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
