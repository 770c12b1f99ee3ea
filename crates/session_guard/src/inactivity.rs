//! Inactivity tracking with a pre-logout warning and reload recovery.

use std::cell::Cell;

use crate::SessionSnapshot;
use crate::markers::ResumeMarkers;

const DEFAULT_IDLE_TIMEOUT_MS: i64 = 10 * 60 * 1000;
const DEFAULT_WARNING_LEAD_MS: i64 = 30 * 1000;
const DEFAULT_HEARTBEAT_INTERVAL_MS: i64 = 10 * 1000;
const DEFAULT_ABSOLUTE_CAP_MS: i64 = 2 * 60 * 60 * 1000;
const DEFAULT_LOGOUT_FLAG_TTL_MS: i64 = 30 * 1000;

/// Timing knobs for the inactivity monitor. Defaults: 10 min idle timeout,
/// 30 s warning lead, 10 s heartbeat, 2 h absolute session cap, 30 s logout
/// flag TTL.
#[derive(Clone, Copy, Debug)]
pub struct InactivityConfig {
    idle_timeout_ms: i64,
    warning_lead_ms: i64,
    heartbeat_interval_ms: i64,
    absolute_cap_ms: i64,
    logout_flag_ttl_ms: i64,
}

impl InactivityConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            idle_timeout_ms: DEFAULT_IDLE_TIMEOUT_MS,
            warning_lead_ms: DEFAULT_WARNING_LEAD_MS,
            heartbeat_interval_ms: DEFAULT_HEARTBEAT_INTERVAL_MS,
            absolute_cap_ms: DEFAULT_ABSOLUTE_CAP_MS,
            logout_flag_ttl_ms: DEFAULT_LOGOUT_FLAG_TTL_MS,
        }
    }

    #[must_use]
    pub fn with_idle_timeout_ms(mut self, ms: i64) -> Self {
        self.idle_timeout_ms = ms;
        self
    }

    #[must_use]
    pub fn with_warning_lead_ms(mut self, ms: i64) -> Self {
        self.warning_lead_ms = ms;
        self
    }

    #[must_use]
    pub fn with_heartbeat_interval_ms(mut self, ms: i64) -> Self {
        self.heartbeat_interval_ms = ms;
        self
    }

    #[must_use]
    pub fn with_absolute_cap_ms(mut self, ms: i64) -> Self {
        self.absolute_cap_ms = ms;
        self
    }

    #[must_use]
    pub fn with_logout_flag_ttl_ms(mut self, ms: i64) -> Self {
        self.logout_flag_ttl_ms = ms;
        self
    }

    #[must_use]
    pub fn idle_timeout_ms(&self) -> i64 {
        self.idle_timeout_ms
    }

    #[must_use]
    pub fn warning_lead_ms(&self) -> i64 {
        self.warning_lead_ms
    }

    #[must_use]
    pub fn heartbeat_interval_ms(&self) -> i64 {
        self.heartbeat_interval_ms
    }

    #[must_use]
    pub fn absolute_cap_ms(&self) -> i64 {
        self.absolute_cap_ms
    }

    #[must_use]
    pub fn logout_flag_ttl_ms(&self) -> i64 {
        self.logout_flag_ttl_ms
    }
}

impl Default for InactivityConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a monitor tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// User active recently; nothing to show.
    Idle,
    /// Within the warning window; the countdown shows `remaining_ms`.
    Warn { remaining_ms: i64 },
    /// Idle timeout reached; the caller triggers the logout coordinator.
    LogoutDue,
}

/// Per-tab inactivity countdown, reset by qualifying user input.
///
/// The monitor only does time math; the embedding application drives it with
/// periodic ticks and forwards activity events. Remember-me sessions never
/// get a monitor (see [`InactivityMonitor::applies_to`]).
#[derive(Debug)]
pub struct InactivityMonitor {
    config: InactivityConfig,
    last_activity_ms: Cell<i64>,
    warning_armed: Cell<bool>,
}

impl InactivityMonitor {
    #[must_use]
    pub fn new(config: InactivityConfig, now_ms: i64) -> Self {
        Self::with_last_activity(config, now_ms)
    }

    /// Rebuild a monitor from a persisted last-activity instant after a
    /// reload, so elapsed idle time is not reset.
    #[must_use]
    pub fn with_last_activity(config: InactivityConfig, last_activity_ms: i64) -> Self {
        Self {
            config,
            last_activity_ms: Cell::new(last_activity_ms),
            warning_armed: Cell::new(false),
        }
    }

    /// Inactivity logout only applies to sessions without remember-me.
    #[must_use]
    pub fn applies_to(session: &SessionSnapshot) -> bool {
        !session.remember_me
    }

    #[must_use]
    pub fn config(&self) -> &InactivityConfig {
        &self.config
    }

    #[must_use]
    pub fn last_activity_ms(&self) -> i64 {
        self.last_activity_ms.get()
    }

    /// Instant at which the forced logout fires absent further activity.
    #[must_use]
    pub fn logout_deadline_ms(&self) -> i64 {
        self.last_activity_ms
            .get()
            .saturating_add(self.config.idle_timeout_ms)
    }

    /// Register a qualifying input event. Returns `true` when an armed
    /// warning was dismissed by this activity.
    pub fn record_activity(&self, now_ms: i64) -> bool {
        self.last_activity_ms.set(now_ms);
        self.warning_armed.replace(false)
    }

    /// Explicit "stay signed in" from the warning dialog; identical to an
    /// activity event but callable without waiting for input.
    pub fn stay_logged_in(&self, now_ms: i64) {
        self.record_activity(now_ms);
    }

    #[must_use]
    pub fn warning_armed(&self) -> bool {
        self.warning_armed.get()
    }

    /// Evaluate elapsed idle time at `now_ms`.
    pub fn tick(&self, now_ms: i64) -> Tick {
        let elapsed = now_ms.saturating_sub(self.last_activity_ms.get());
        if elapsed >= self.config.idle_timeout_ms {
            return Tick::LogoutDue;
        }
        let warn_after = self.config.idle_timeout_ms - self.config.warning_lead_ms;
        if elapsed >= warn_after {
            self.warning_armed.set(true);
            return Tick::Warn {
                remaining_ms: self.config.idle_timeout_ms - elapsed,
            };
        }
        Tick::Idle
    }
}

/// Why a reload decided to log out immediately instead of arming a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForceLogoutReason {
    /// Persistent session markers exist but the transient tab marker is
    /// gone, so the browser was (presumably) closed in between.
    BrowserClosed,
    /// Persisted inactivity already exceeds the idle timeout.
    IdleTimeout,
    /// Session age exceeds the absolute cap.
    AbsoluteCap,
}

/// Decision for a freshly loaded tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResumeDecision {
    /// No prior session markers: treat as a brand-new session.
    FreshSession,
    /// Markers are live and within bounds; resume counting from
    /// `last_activity_ms`.
    Resumed { last_activity_ms: i64 },
    /// Out of bounds; log out immediately instead of arming a fresh timer.
    ForceLogout(ForceLogoutReason),
}

/// Decide what a loading tab should do with persisted session markers.
///
/// The browser-close detection is a heuristic, not a guarantee: a browser
/// restoring tabs may resurrect `sessionStorage` and look like a reload, and
/// some embedders clear it on reload. False positives only cost an extra
/// login; false negatives are bounded by the idle and absolute caps.
#[must_use]
pub fn evaluate_resume(
    config: &InactivityConfig,
    now_ms: i64,
    markers: &ResumeMarkers,
) -> ResumeDecision {
    let Some(session_start) = markers.session_start_ms else {
        return ResumeDecision::FreshSession;
    };
    if !markers.tab_alive {
        return ResumeDecision::ForceLogout(ForceLogoutReason::BrowserClosed);
    }
    let last_activity = markers.last_activity_ms.unwrap_or(session_start);
    if now_ms.saturating_sub(last_activity) >= config.idle_timeout_ms() {
        return ResumeDecision::ForceLogout(ForceLogoutReason::IdleTimeout);
    }
    if now_ms.saturating_sub(session_start) >= config.absolute_cap_ms() {
        return ResumeDecision::ForceLogout(ForceLogoutReason::AbsoluteCap);
    }
    ResumeDecision::Resumed {
        last_activity_ms: last_activity,
    }
}
