//! Typed accessors for the session markers kept in browser storage.
//!
//! Persistent markers live in `localStorage` and survive reloads; the tab
//! marker lives in `sessionStorage` and dies with the tab. The split is what
//! the browser-close heuristic in [`crate::inactivity::evaluate_resume`]
//! relies on.

use std::rc::Rc;

use crate::error::StoreError;
use crate::store::KeyValueStore;

/// Prefix for every client-held authentication artifact. Logout clears all
/// keys under this prefix in one sweep.
pub const AUTH_KEY_PREFIX: &str = "honorarx.auth.";

/// Last qualifying user input, Unix milliseconds.
pub const LAST_ACTIVITY_KEY: &str = "honorarx.auth.last_activity";
/// Periodic liveness timestamp, Unix milliseconds.
pub const HEARTBEAT_KEY: &str = "honorarx.auth.heartbeat";
/// First-login timestamp backing the absolute session cap.
pub const SESSION_START_KEY: &str = "honorarx.auth.session_start";
/// Present when the session was created with remember-me.
pub const REMEMBER_ME_KEY: &str = "honorarx.auth.remember_me";
/// Transient per-tab marker; absence with a persistent session marker means
/// the browser was closed in between.
pub const TAB_MARKER_KEY: &str = "honorarx.tab";
/// Cross-tab logout flag. Deliberately outside [`AUTH_KEY_PREFIX`] so it
/// survives the artifact sweep long enough for sibling tabs to observe it;
/// it expires by TTL instead.
pub const LOGOUT_FLAG_KEY: &str = "honorarx.logout";

/// Snapshot of the persisted markers used to rebuild inactivity state after
/// a reload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResumeMarkers {
    pub session_start_ms: Option<i64>,
    pub last_activity_ms: Option<i64>,
    pub tab_alive: bool,
}

/// Marker store pair for one tab.
#[derive(Clone)]
pub struct SessionMarkers {
    persistent: Rc<dyn KeyValueStore>,
    transient: Rc<dyn KeyValueStore>,
}

impl SessionMarkers {
    pub fn new(persistent: Rc<dyn KeyValueStore>, transient: Rc<dyn KeyValueStore>) -> Self {
        Self {
            persistent,
            transient,
        }
    }

    /// Record the start of a fresh session: start/activity timestamps, the
    /// remember-me flag, and the tab marker.
    pub fn begin_session(&self, now_ms: i64, remember_me: bool) -> Result<(), StoreError> {
        self.persistent
            .set(SESSION_START_KEY, &now_ms.to_string())?;
        self.persistent
            .set(LAST_ACTIVITY_KEY, &now_ms.to_string())?;
        if remember_me {
            self.persistent.set(REMEMBER_ME_KEY, "1")?;
        } else {
            self.persistent.remove(REMEMBER_ME_KEY)?;
        }
        self.mark_tab_alive()
    }

    /// Mark this tab as live; called on every mount so a reload keeps the
    /// marker while a browser restart loses it.
    pub fn mark_tab_alive(&self) -> Result<(), StoreError> {
        self.transient.set(TAB_MARKER_KEY, "1")
    }

    pub fn record_activity(&self, now_ms: i64) -> Result<(), StoreError> {
        self.persistent.set(LAST_ACTIVITY_KEY, &now_ms.to_string())
    }

    pub fn record_heartbeat(&self, now_ms: i64) -> Result<(), StoreError> {
        self.persistent.set(HEARTBEAT_KEY, &now_ms.to_string())
    }

    #[must_use]
    pub fn session_start(&self) -> Option<i64> {
        read_ms(self.persistent.as_ref(), SESSION_START_KEY)
    }

    /// Effective last-activity instant: the activity marker when present,
    /// otherwise the latest heartbeat.
    #[must_use]
    pub fn last_activity(&self) -> Option<i64> {
        let activity = read_ms(self.persistent.as_ref(), LAST_ACTIVITY_KEY);
        let heartbeat = read_ms(self.persistent.as_ref(), HEARTBEAT_KEY);
        match (activity, heartbeat) {
            (Some(activity), Some(heartbeat)) => Some(activity.max(heartbeat)),
            (Some(value), None) | (None, Some(value)) => Some(value),
            (None, None) => None,
        }
    }

    #[must_use]
    pub fn remember_me(&self) -> bool {
        self.persistent.get(REMEMBER_ME_KEY).is_some()
    }

    #[must_use]
    pub fn tab_alive(&self) -> bool {
        self.transient.get(TAB_MARKER_KEY).is_some()
    }

    #[must_use]
    pub fn resume_markers(&self) -> ResumeMarkers {
        ResumeMarkers {
            session_start_ms: self.session_start(),
            last_activity_ms: self.last_activity(),
            tab_alive: self.tab_alive(),
        }
    }

    pub fn set_logout_flag(&self, now_ms: i64) -> Result<(), StoreError> {
        self.persistent.set(LOGOUT_FLAG_KEY, &now_ms.to_string())
    }

    /// A logout is underway if the flag is present and younger than `ttl_ms`.
    /// Stale flags (an interrupted logout, clock skew) are ignored.
    #[must_use]
    pub fn logout_in_progress(&self, now_ms: i64, ttl_ms: i64) -> bool {
        read_ms(self.persistent.as_ref(), LOGOUT_FLAG_KEY)
            .is_some_and(|at_ms| now_ms.saturating_sub(at_ms) <= ttl_ms)
    }

    pub fn clear_logout_flag(&self) -> Result<(), StoreError> {
        self.persistent.remove(LOGOUT_FLAG_KEY)
    }

    /// Remove every client-held auth artifact from both storage areas.
    /// Idempotent; individual removal failures are swallowed so a blocked
    /// storage area cannot abort a logout.
    pub fn clear_auth_artifacts(&self) {
        clear_auth_artifacts(self.persistent.as_ref(), self.transient.as_ref());
    }
}

/// Prefix-sweep both stores and drop the tab marker.
pub fn clear_auth_artifacts(persistent: &dyn KeyValueStore, transient: &dyn KeyValueStore) {
    for store in [persistent, transient] {
        for key in store.keys() {
            if key.starts_with(AUTH_KEY_PREFIX) {
                let _ = store.remove(&key);
            }
        }
    }
    let _ = transient.remove(TAB_MARKER_KEY);
}

fn read_ms(store: &dyn KeyValueStore, key: &str) -> Option<i64> {
    store.get(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::{
        HEARTBEAT_KEY, LAST_ACTIVITY_KEY, LOGOUT_FLAG_KEY, REMEMBER_ME_KEY, SESSION_START_KEY,
        SessionMarkers, TAB_MARKER_KEY,
    };
    use crate::store::{KeyValueStore, MemoryStore};

    fn markers() -> (Rc<MemoryStore>, Rc<MemoryStore>, SessionMarkers) {
        let persistent = Rc::new(MemoryStore::new());
        let transient = Rc::new(MemoryStore::new());
        let markers = SessionMarkers::new(persistent.clone(), transient.clone());
        (persistent, transient, markers)
    }

    #[test]
    fn begin_session_writes_all_markers() {
        let (persistent, transient, markers) = markers();
        markers.begin_session(1_000, true).expect("begin session");

        assert_eq!(persistent.get(SESSION_START_KEY).as_deref(), Some("1000"));
        assert_eq!(persistent.get(LAST_ACTIVITY_KEY).as_deref(), Some("1000"));
        assert!(persistent.get(REMEMBER_ME_KEY).is_some());
        assert!(transient.get(TAB_MARKER_KEY).is_some());
        assert!(markers.remember_me());
        assert!(markers.tab_alive());
    }

    #[test]
    fn begin_session_without_remember_me_drops_stale_flag() {
        let (persistent, _, markers) = markers();
        persistent.set(REMEMBER_ME_KEY, "1").expect("seed flag");
        markers.begin_session(1_000, false).expect("begin session");
        assert!(!markers.remember_me());
    }

    #[test]
    fn last_activity_prefers_newest_of_activity_and_heartbeat() {
        let (_, _, markers) = markers();
        markers.record_activity(5_000).expect("activity");
        markers.record_heartbeat(9_000).expect("heartbeat");
        assert_eq!(markers.last_activity(), Some(9_000));

        markers.record_activity(12_000).expect("activity");
        assert_eq!(markers.last_activity(), Some(12_000));
    }

    #[test]
    fn last_activity_none_without_markers() {
        let (_, _, markers) = markers();
        assert_eq!(markers.last_activity(), None);
    }

    #[test]
    fn logout_flag_expires_after_ttl() {
        let (_, _, markers) = markers();
        markers.set_logout_flag(10_000).expect("set flag");
        assert!(markers.logout_in_progress(10_000, 30_000));
        assert!(markers.logout_in_progress(40_000, 30_000));
        assert!(!markers.logout_in_progress(40_001, 30_000));
    }

    #[test]
    fn unparseable_flag_is_ignored() {
        let (persistent, _, markers) = markers();
        persistent.set(LOGOUT_FLAG_KEY, "garbage").expect("seed");
        assert!(!markers.logout_in_progress(0, 30_000));
    }

    #[test]
    fn clear_auth_artifacts_removes_prefixed_keys_and_tab_marker() {
        let (persistent, transient, markers) = markers();
        markers.begin_session(1_000, true).expect("begin session");
        markers.record_heartbeat(2_000).expect("heartbeat");
        persistent.set("theme", "dark").expect("unrelated key");
        markers.set_logout_flag(2_500).expect("flag");

        markers.clear_auth_artifacts();

        assert_eq!(persistent.get(SESSION_START_KEY), None);
        assert_eq!(persistent.get(LAST_ACTIVITY_KEY), None);
        assert_eq!(persistent.get(HEARTBEAT_KEY), None);
        assert_eq!(persistent.get(REMEMBER_ME_KEY), None);
        assert_eq!(transient.get(TAB_MARKER_KEY), None);
        // Unrelated keys stay; the logout flag outlives the sweep for
        // sibling tabs and expires by TTL instead.
        assert_eq!(persistent.get("theme").as_deref(), Some("dark"));
        assert!(persistent.get(LOGOUT_FLAG_KEY).is_some());

        // Second sweep is a no-op.
        markers.clear_auth_artifacts();
        assert_eq!(persistent.get("theme").as_deref(), Some("dark"));
    }
}
