//! In-memory directory for users, sessions, tokens, and the email outbox.
//!
//! Persistence is an opaque service from the handlers' point of view: they
//! only see record types and outcome enums. Everything lives behind async
//! mutexes keyed by hashed tokens; raw tokens never enter the directory.

use anyhow::{Result, anyhow};
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::state::AuthConfig;
use super::utils::{build_reset_url, build_verify_url, generate_token, hash_token};

/// Outcome when attempting to create a new user + verification record.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SignupOutcome {
    Created,
    Conflict,
}

/// Outcome for resend/reset requests (handlers answer 204 regardless, to
/// avoid account probing).
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ResendOutcome {
    Queued,
    Cooldown,
    Noop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum UserStatus {
    PendingVerification,
    Active,
}

#[derive(Clone, Debug)]
pub(crate) struct UserRecord {
    pub(crate) id: Uuid,
    pub(crate) email: String,
    pub(crate) password_hash: String,
    pub(crate) status: UserStatus,
    pub(crate) display_name: Option<String>,
    pub(crate) locale: Option<String>,
    pub(crate) created_at_unix: i64,
    pub(crate) updated_at_unix: i64,
}

/// Minimal fields needed to check credentials at login.
pub(crate) struct LoginRecord {
    pub(crate) user_id: Uuid,
    pub(crate) status: UserStatus,
    pub(crate) password_hash: String,
}

#[derive(Clone, Debug)]
struct SessionRecord {
    user_id: Uuid,
    issued_at_unix: i64,
    expires_at_unix: i64,
    remember_me: bool,
    last_seen_at_unix: i64,
}

/// Session summary handed back for a valid cookie; mirrors what the
/// frontend needs to drive its expiry and inactivity timers.
#[derive(Clone, Debug)]
pub(crate) struct SessionView {
    pub(crate) user_id: Uuid,
    pub(crate) email: String,
    pub(crate) display_name: Option<String>,
    pub(crate) expires_at_unix: i64,
    pub(crate) remember_me: bool,
}

#[derive(Clone, Debug)]
struct TokenRecord {
    user_id: Uuid,
    created_at_unix: i64,
    expires_at_unix: i64,
    consumed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OutboxStatus {
    Pending,
    Sent,
    Failed,
}

/// One queued email. `payload_json` carries template data; rendering is the
/// sender's concern.
#[derive(Clone, Debug)]
pub struct OutboxMessage {
    pub id: Uuid,
    pub to_email: String,
    pub template: String,
    pub payload_json: String,
    pub attempts: u32,
}

#[derive(Clone, Debug)]
struct OutboxRow {
    message: OutboxMessage,
    status: OutboxStatus,
    next_attempt_at_unix: i64,
    last_error: Option<String>,
}

#[derive(Default)]
struct UsersTable {
    by_id: HashMap<Uuid, UserRecord>,
    by_email: HashMap<String, Uuid>,
}

/// The whole in-memory persistence surface.
pub struct Directory {
    users: Mutex<UsersTable>,
    sessions: Mutex<HashMap<Vec<u8>, SessionRecord>>,
    verification_tokens: Mutex<HashMap<Vec<u8>, TokenRecord>>,
    reset_tokens: Mutex<HashMap<Vec<u8>, TokenRecord>>,
    outbox: Mutex<Vec<OutboxRow>>,
}

impl Directory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Mutex::new(UsersTable::default()),
            sessions: Mutex::new(HashMap::new()),
            verification_tokens: Mutex::new(HashMap::new()),
            reset_tokens: Mutex::new(HashMap::new()),
            outbox: Mutex::new(Vec::new()),
        }
    }

    /// Create a user in `PendingVerification` and queue the verification
    /// email. Duplicate emails yield `Conflict` and change nothing.
    pub(crate) async fn insert_user_and_verification(
        &self,
        email: &str,
        password_hash: String,
        config: &AuthConfig,
        now_unix: i64,
    ) -> Result<SignupOutcome> {
        let user_id = {
            let mut users = self.users.lock().await;
            if users.by_email.contains_key(email) {
                return Ok(SignupOutcome::Conflict);
            }
            let user_id = Uuid::new_v4();
            users.by_id.insert(
                user_id,
                UserRecord {
                    id: user_id,
                    email: email.to_string(),
                    password_hash,
                    status: UserStatus::PendingVerification,
                    display_name: None,
                    locale: None,
                    created_at_unix: now_unix,
                    updated_at_unix: now_unix,
                },
            );
            users.by_email.insert(email.to_string(), user_id);
            user_id
        };

        self.queue_verification(user_id, email, config, now_unix)
            .await?;
        Ok(SignupOutcome::Created)
    }

    /// Mint a verification token (hash stored, raw value emailed) and
    /// enqueue the outbox row.
    async fn queue_verification(
        &self,
        user_id: Uuid,
        email: &str,
        config: &AuthConfig,
        now_unix: i64,
    ) -> Result<String> {
        let token = generate_token()?;
        let token_hash = hash_token(&token);
        self.verification_tokens.lock().await.insert(
            token_hash,
            TokenRecord {
                user_id,
                created_at_unix: now_unix,
                expires_at_unix: now_unix + config.email_token_ttl_seconds(),
                consumed: false,
            },
        );

        let verify_url = build_verify_url(config.frontend_base_url(), &token);
        let payload = json!({ "email": email, "verify_url": verify_url });
        self.enqueue_outbox(email, "verify_email", payload.to_string(), now_unix)
            .await;
        Ok(token)
    }

    pub(crate) async fn lookup_login(&self, email: &str) -> Option<LoginRecord> {
        let users = self.users.lock().await;
        let user_id = users.by_email.get(email)?;
        let user = users.by_id.get(user_id)?;
        Some(LoginRecord {
            user_id: user.id,
            status: user.status,
            password_hash: user.password_hash.clone(),
        })
    }

    /// Generate a session token, store only its hash, and return the raw
    /// value so the caller can set the cookie.
    pub(crate) async fn create_session(
        &self,
        user_id: Uuid,
        remember_me: bool,
        ttl_seconds: i64,
        now_unix: i64,
    ) -> Result<String> {
        let mut sessions = self.sessions.lock().await;
        for _ in 0..3 {
            let token = generate_token()?;
            let token_hash = hash_token(&token);
            if sessions.contains_key(&token_hash) {
                continue;
            }
            sessions.insert(
                token_hash,
                SessionRecord {
                    user_id,
                    issued_at_unix: now_unix,
                    expires_at_unix: now_unix + ttl_seconds,
                    remember_me,
                    last_seen_at_unix: now_unix,
                },
            );
            return Ok(token);
        }
        Err(anyhow!("failed to generate unique session token"))
    }

    /// Resolve a session hash. Only unexpired sessions of active users
    /// count; a hit records activity without extending the TTL.
    pub(crate) async fn lookup_session(
        &self,
        token_hash: &[u8],
        now_unix: i64,
    ) -> Option<SessionView> {
        let mut sessions = self.sessions.lock().await;
        let record = sessions.get_mut(token_hash)?;
        if record.expires_at_unix <= now_unix {
            return None;
        }
        record.last_seen_at_unix = now_unix;
        let (user_id, expires_at_unix, remember_me) =
            (record.user_id, record.expires_at_unix, record.remember_me);
        drop(sessions);

        let users = self.users.lock().await;
        let user = users.by_id.get(&user_id)?;
        if user.status != UserStatus::Active {
            return None;
        }
        Some(SessionView {
            user_id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            expires_at_unix,
            remember_me,
        })
    }

    /// Push the session expiry out by `ttl_seconds` from now (the "extend"
    /// action of the expiry notifier). Same validity rules as lookup.
    pub(crate) async fn extend_session(
        &self,
        token_hash: &[u8],
        ttl_seconds: i64,
        now_unix: i64,
    ) -> Option<SessionView> {
        {
            let mut sessions = self.sessions.lock().await;
            let record = sessions.get_mut(token_hash)?;
            if record.expires_at_unix <= now_unix {
                return None;
            }
            record.expires_at_unix = now_unix + ttl_seconds;
            record.last_seen_at_unix = now_unix;
        }
        self.lookup_session(token_hash, now_unix).await
    }

    /// Logout is idempotent; deleting a missing session is fine.
    pub(crate) async fn delete_session(&self, token_hash: &[u8]) {
        self.sessions.lock().await.remove(token_hash);
    }

    /// Drop every session of one user (password change hygiene).
    pub(crate) async fn delete_sessions_for(&self, user_id: Uuid) {
        self.sessions
            .lock()
            .await
            .retain(|_, record| record.user_id != user_id);
    }

    /// Consume a verification token and activate its user. Returns `false`
    /// for unknown, expired, or already-consumed tokens.
    pub(crate) async fn consume_verification_token(
        &self,
        token_hash: &[u8],
        now_unix: i64,
    ) -> bool {
        let user_id = {
            let mut tokens = self.verification_tokens.lock().await;
            let Some(record) = tokens.get_mut(token_hash) else {
                return false;
            };
            if record.consumed || record.expires_at_unix <= now_unix {
                return false;
            }
            record.consumed = true;
            record.user_id
        };

        let mut users = self.users.lock().await;
        if let Some(user) = users.by_id.get_mut(&user_id) {
            user.status = UserStatus::Active;
            user.updated_at_unix = now_unix;
        }
        true
    }

    /// Queue another verification email unless the user is unknown, already
    /// active, or inside the resend cooldown.
    pub(crate) async fn enqueue_resend_verification(
        &self,
        email: &str,
        config: &AuthConfig,
        now_unix: i64,
    ) -> Result<ResendOutcome> {
        let user_id = {
            let users = self.users.lock().await;
            let Some(user_id) = users.by_email.get(email).copied() else {
                return Ok(ResendOutcome::Noop);
            };
            let Some(user) = users.by_id.get(&user_id) else {
                return Ok(ResendOutcome::Noop);
            };
            if user.status != UserStatus::PendingVerification {
                return Ok(ResendOutcome::Noop);
            }
            user_id
        };

        if self
            .token_cooldown_active(
                &self.verification_tokens,
                user_id,
                config.resend_cooldown_seconds(),
                now_unix,
            )
            .await
        {
            return Ok(ResendOutcome::Cooldown);
        }

        self.queue_verification(user_id, email, config, now_unix)
            .await?;
        Ok(ResendOutcome::Queued)
    }

    /// Mint a password-reset token and queue the email, for any known user.
    pub(crate) async fn enqueue_password_reset(
        &self,
        email: &str,
        config: &AuthConfig,
        now_unix: i64,
    ) -> Result<ResendOutcome> {
        let user_id = {
            let users = self.users.lock().await;
            let Some(user_id) = users.by_email.get(email).copied() else {
                return Ok(ResendOutcome::Noop);
            };
            user_id
        };

        if self
            .token_cooldown_active(
                &self.reset_tokens,
                user_id,
                config.resend_cooldown_seconds(),
                now_unix,
            )
            .await
        {
            return Ok(ResendOutcome::Cooldown);
        }

        let token = generate_token()?;
        let token_hash = hash_token(&token);
        self.reset_tokens.lock().await.insert(
            token_hash,
            TokenRecord {
                user_id,
                created_at_unix: now_unix,
                expires_at_unix: now_unix + config.reset_token_ttl_seconds(),
                consumed: false,
            },
        );

        let reset_url = build_reset_url(config.frontend_base_url(), &token);
        let payload = json!({ "email": email, "reset_url": reset_url });
        self.enqueue_outbox(email, "password_reset", payload.to_string(), now_unix)
            .await;
        Ok(ResendOutcome::Queued)
    }

    /// Consume a reset token, replace the password hash, and drop the user's
    /// sessions so stolen cookies die with the old password.
    pub(crate) async fn consume_reset_token(
        &self,
        token_hash: &[u8],
        new_password_hash: String,
        now_unix: i64,
    ) -> bool {
        let user_id = {
            let mut tokens = self.reset_tokens.lock().await;
            let Some(record) = tokens.get_mut(token_hash) else {
                return false;
            };
            if record.consumed || record.expires_at_unix <= now_unix {
                return false;
            }
            record.consumed = true;
            record.user_id
        };

        {
            let mut users = self.users.lock().await;
            let Some(user) = users.by_id.get_mut(&user_id) else {
                return false;
            };
            user.password_hash = new_password_hash;
            user.updated_at_unix = now_unix;
        }
        self.delete_sessions_for(user_id).await;
        true
    }

    pub(crate) async fn profile(&self, user_id: Uuid) -> Option<UserRecord> {
        self.users.lock().await.by_id.get(&user_id).cloned()
    }

    /// Apply allow-listed profile updates; `None` fields are left untouched.
    pub(crate) async fn update_profile(
        &self,
        user_id: Uuid,
        display_name: Option<String>,
        locale: Option<String>,
        now_unix: i64,
    ) -> Option<UserRecord> {
        let mut users = self.users.lock().await;
        let user = users.by_id.get_mut(&user_id)?;
        if let Some(display_name) = display_name {
            user.display_name = Some(display_name);
        }
        if let Some(locale) = locale {
            user.locale = Some(locale);
        }
        user.updated_at_unix = now_unix;
        Some(user.clone())
    }

    /// Queue a contact-form message for the configured inbox.
    pub(crate) async fn enqueue_contact(
        &self,
        config: &AuthConfig,
        name: &str,
        reply_to: &str,
        message: &str,
        now_unix: i64,
    ) {
        let payload = json!({ "name": name, "reply_to": reply_to, "message": message });
        self.enqueue_outbox(
            config.contact_inbox(),
            "contact_message",
            payload.to_string(),
            now_unix,
        )
        .await;
    }

    async fn enqueue_outbox(
        &self,
        to_email: &str,
        template: &str,
        payload_json: String,
        now_unix: i64,
    ) {
        self.outbox.lock().await.push(OutboxRow {
            message: OutboxMessage {
                id: Uuid::new_v4(),
                to_email: to_email.to_string(),
                template: template.to_string(),
                payload_json,
                attempts: 0,
            },
            status: OutboxStatus::Pending,
            next_attempt_at_unix: now_unix,
            last_error: None,
        });
    }

    /// Pending messages whose next attempt is due, oldest first.
    pub(crate) async fn due_outbox_batch(
        &self,
        now_unix: i64,
        batch_size: usize,
    ) -> Vec<OutboxMessage> {
        let outbox = self.outbox.lock().await;
        let mut due: Vec<&OutboxRow> = outbox
            .iter()
            .filter(|row| {
                row.status == OutboxStatus::Pending && row.next_attempt_at_unix <= now_unix
            })
            .collect();
        due.sort_by_key(|row| row.next_attempt_at_unix);
        due.into_iter()
            .take(batch_size)
            .map(|row| row.message.clone())
            .collect()
    }

    pub(crate) async fn record_outbox_success(&self, id: Uuid, attempts: u32) {
        let mut outbox = self.outbox.lock().await;
        if let Some(row) = outbox.iter_mut().find(|row| row.message.id == id) {
            row.status = OutboxStatus::Sent;
            row.message.attempts = attempts;
            row.last_error = None;
        }
    }

    pub(crate) async fn record_outbox_retry(
        &self,
        id: Uuid,
        attempts: u32,
        error: String,
        next_attempt_at_unix: i64,
    ) {
        let mut outbox = self.outbox.lock().await;
        if let Some(row) = outbox.iter_mut().find(|row| row.message.id == id) {
            row.status = OutboxStatus::Pending;
            row.message.attempts = attempts;
            row.last_error = Some(error);
            row.next_attempt_at_unix = next_attempt_at_unix;
        }
    }

    pub(crate) async fn record_outbox_failure(&self, id: Uuid, attempts: u32, error: String) {
        let mut outbox = self.outbox.lock().await;
        if let Some(row) = outbox.iter_mut().find(|row| row.message.id == id) {
            row.status = OutboxStatus::Failed;
            row.message.attempts = attempts;
            row.last_error = Some(error);
        }
    }

    pub(crate) async fn outbox_pending_count(&self, now_unix: i64) -> usize {
        self.outbox
            .lock()
            .await
            .iter()
            .filter(|row| {
                row.status == OutboxStatus::Pending && row.next_attempt_at_unix <= now_unix
            })
            .count()
    }

    async fn token_cooldown_active(
        &self,
        table: &Mutex<HashMap<Vec<u8>, TokenRecord>>,
        user_id: Uuid,
        cooldown_seconds: i64,
        now_unix: i64,
    ) -> bool {
        table.lock().await.values().any(|record| {
            record.user_id == user_id && record.created_at_unix > now_unix - cooldown_seconds
        })
    }

    #[cfg(test)]
    pub(crate) async fn outbox_templates(&self) -> Vec<(String, OutboxStatus)> {
        self.outbox
            .lock()
            .await
            .iter()
            .map(|row| (row.message.template.clone(), row.status))
            .collect()
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Directory, OutboxStatus, ResendOutcome, SignupOutcome, UserStatus};
    use crate::api::handlers::auth::state::AuthConfig;
    use crate::api::handlers::auth::utils::hash_token;

    fn config() -> AuthConfig {
        AuthConfig::new("https://honorarx.dev".to_string())
    }

    async fn signup(directory: &Directory, email: &str, now: i64) {
        let outcome = directory
            .insert_user_and_verification(email, "hash".to_string(), &config(), now)
            .await
            .expect("signup");
        assert_eq!(outcome, SignupOutcome::Created);
    }

    #[tokio::test]
    async fn duplicate_signup_conflicts() {
        let directory = Directory::new();
        signup(&directory, "a@example.com", 0).await;
        let outcome = directory
            .insert_user_and_verification("a@example.com", "hash2".to_string(), &config(), 1)
            .await
            .expect("second signup");
        assert_eq!(outcome, SignupOutcome::Conflict);
        // Only the first signup queued a verification email.
        assert_eq!(directory.outbox_templates().await.len(), 1);
    }

    #[tokio::test]
    async fn pending_user_has_no_session_access() {
        let directory = Directory::new();
        signup(&directory, "a@example.com", 0).await;
        let login = directory
            .lookup_login("a@example.com")
            .await
            .expect("login record");
        assert_eq!(login.status, UserStatus::PendingVerification);

        let token = directory
            .create_session(login.user_id, false, 7_200, 10)
            .await
            .expect("session");
        // Session exists but the user is not active yet.
        assert!(
            directory
                .lookup_session(&hash_token(&token), 11)
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn verification_activates_user_and_unlocks_session() {
        let directory = Directory::new();
        signup(&directory, "a@example.com", 0).await;
        let login = directory
            .lookup_login("a@example.com")
            .await
            .expect("login record");

        // Grab the verification token hash directly from the table.
        let token_hash = {
            let tokens = directory.verification_tokens.lock().await;
            tokens.keys().next().cloned().expect("verification token")
        };
        assert!(directory.consume_verification_token(&token_hash, 5).await);
        // Second consume is rejected.
        assert!(!directory.consume_verification_token(&token_hash, 6).await);

        let token = directory
            .create_session(login.user_id, true, 600, 10)
            .await
            .expect("session");
        let view = directory
            .lookup_session(&hash_token(&token), 11)
            .await
            .expect("session view");
        assert_eq!(view.email, "a@example.com");
        assert_eq!(view.expires_at_unix, 610);
        assert!(view.remember_me);
    }

    #[tokio::test]
    async fn expired_verification_token_is_rejected() {
        let directory = Directory::new();
        signup(&directory, "a@example.com", 0).await;
        let token_hash = {
            let tokens = directory.verification_tokens.lock().await;
            tokens.keys().next().cloned().expect("verification token")
        };
        let past_ttl = config().email_token_ttl_seconds() + 1;
        assert!(
            !directory
                .consume_verification_token(&token_hash, past_ttl)
                .await
        );
    }

    #[tokio::test]
    async fn expired_session_is_not_returned() {
        let directory = Directory::new();
        signup(&directory, "a@example.com", 0).await;
        let token_hash = {
            let tokens = directory.verification_tokens.lock().await;
            tokens.keys().next().cloned().expect("token")
        };
        assert!(directory.consume_verification_token(&token_hash, 1).await);
        let login = directory.lookup_login("a@example.com").await.expect("login");

        let token = directory
            .create_session(login.user_id, false, 100, 0)
            .await
            .expect("session");
        assert!(
            directory
                .lookup_session(&hash_token(&token), 99)
                .await
                .is_some()
        );
        assert!(
            directory
                .lookup_session(&hash_token(&token), 100)
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn extend_session_pushes_expiry_forward() {
        let directory = Directory::new();
        signup(&directory, "a@example.com", 0).await;
        let token_hash = {
            let tokens = directory.verification_tokens.lock().await;
            tokens.keys().next().cloned().expect("token")
        };
        assert!(directory.consume_verification_token(&token_hash, 1).await);
        let login = directory.lookup_login("a@example.com").await.expect("login");

        let token = directory
            .create_session(login.user_id, false, 100, 0)
            .await
            .expect("session");
        let view = directory
            .extend_session(&hash_token(&token), 7_200, 50)
            .await
            .expect("extended");
        assert_eq!(view.expires_at_unix, 7_250);

        // A deleted (or expired) session cannot be extended.
        directory.delete_session(&hash_token(&token)).await;
        assert!(
            directory
                .extend_session(&hash_token(&token), 7_200, 60)
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn resend_respects_cooldown_and_status() {
        let directory = Directory::new();
        signup(&directory, "a@example.com", 0).await;

        let outcome = directory
            .enqueue_resend_verification("a@example.com", &config(), 30)
            .await
            .expect("resend");
        assert_eq!(outcome, ResendOutcome::Cooldown);

        let outcome = directory
            .enqueue_resend_verification("a@example.com", &config(), 61)
            .await
            .expect("resend");
        assert_eq!(outcome, ResendOutcome::Queued);

        let outcome = directory
            .enqueue_resend_verification("missing@example.com", &config(), 61)
            .await
            .expect("resend");
        assert_eq!(outcome, ResendOutcome::Noop);
    }

    #[tokio::test]
    async fn password_reset_replaces_hash_and_drops_sessions() {
        let directory = Directory::new();
        signup(&directory, "a@example.com", 0).await;
        let token_hash = {
            let tokens = directory.verification_tokens.lock().await;
            tokens.keys().next().cloned().expect("token")
        };
        assert!(directory.consume_verification_token(&token_hash, 1).await);
        let login = directory.lookup_login("a@example.com").await.expect("login");
        let session_token = directory
            .create_session(login.user_id, false, 7_200, 2)
            .await
            .expect("session");

        let outcome = directory
            .enqueue_password_reset("a@example.com", &config(), 100)
            .await
            .expect("reset request");
        assert_eq!(outcome, ResendOutcome::Queued);

        let reset_hash = {
            let tokens = directory.reset_tokens.lock().await;
            tokens.keys().next().cloned().expect("reset token")
        };
        assert!(
            directory
                .consume_reset_token(&reset_hash, "new-hash".to_string(), 101)
                .await
        );

        let login = directory.lookup_login("a@example.com").await.expect("login");
        assert_eq!(login.password_hash, "new-hash");
        // Existing sessions died with the old password.
        assert!(
            directory
                .lookup_session(&hash_token(&session_token), 102)
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn profile_updates_are_allow_listed() {
        let directory = Directory::new();
        signup(&directory, "a@example.com", 0).await;
        let login = directory.lookup_login("a@example.com").await.expect("login");

        let updated = directory
            .update_profile(login.user_id, Some("Ada".to_string()), None, 10)
            .await
            .expect("update");
        assert_eq!(updated.display_name.as_deref(), Some("Ada"));
        assert_eq!(updated.locale, None);
        assert_eq!(updated.updated_at_unix, 10);

        let updated = directory
            .update_profile(login.user_id, None, Some("de-DE".to_string()), 11)
            .await
            .expect("update");
        assert_eq!(updated.display_name.as_deref(), Some("Ada"));
        assert_eq!(updated.locale.as_deref(), Some("de-DE"));
    }

    #[tokio::test]
    async fn outbox_batch_orders_and_limits() {
        let directory = Directory::new();
        directory.enqueue_outbox("a@x.com", "t", "{}".into(), 5).await;
        directory.enqueue_outbox("b@x.com", "t", "{}".into(), 1).await;
        directory.enqueue_outbox("c@x.com", "t", "{}".into(), 9).await;

        let batch = directory.due_outbox_batch(6, 2).await;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].to_email, "b@x.com");
        assert_eq!(batch[1].to_email, "a@x.com");
    }

    #[tokio::test]
    async fn outbox_transitions_track_attempts() {
        let directory = Directory::new();
        directory.enqueue_outbox("a@x.com", "t", "{}".into(), 0).await;
        let message = directory.due_outbox_batch(0, 10).await.remove(0);

        directory
            .record_outbox_retry(message.id, 1, "boom".to_string(), 100)
            .await;
        assert!(directory.due_outbox_batch(50, 10).await.is_empty());
        assert_eq!(directory.due_outbox_batch(100, 10).await.len(), 1);

        directory.record_outbox_success(message.id, 2).await;
        assert!(directory.due_outbox_batch(200, 10).await.is_empty());
        assert_eq!(
            directory.outbox_templates().await,
            vec![("t".to_string(), OutboxStatus::Sent)]
        );
        assert_eq!(directory.outbox_pending_count(200).await, 0);
    }
}
