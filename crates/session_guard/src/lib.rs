//! # Session Guard
//!
//! Session lifecycle coordination for HonorarX browser clients.
//!
//! The crate models the client-side session state machines — single-flight
//! logout, inactivity tracking with a pre-logout warning, cross-tab logout
//! notices, and token-expiry warnings — without touching any browser API.
//! Time, storage, broadcast, sign-out, and navigation are injected through
//! small traits so every state transition can be driven deterministically in
//! tests and wired to `web-sys` in the frontend.
//!
//! ## Timing model
//!
//! All countdowns are advisory wall-clock math over injected `now` values:
//! `remaining_ms(now, deadline)` is pure, and the monitors never schedule
//! anything themselves. The embedding application decides when to call
//! `tick`; a late tick only shortens the displayed countdown, never the
//! enforced deadline.
//!
//! ## Concurrency model
//!
//! Single-threaded and cooperative, matching a browser tab: interior
//! mutability is `Cell`/`RefCell`, nothing is `Send`. Within one tab the
//! logout sequence is single-flight; across tabs it is best-effort because
//! every step (storage clear, sign-out call, redirect) is idempotent.

pub mod bus;
pub mod clock;
pub mod coordinator;
pub mod error;
pub mod expiry;
pub mod inactivity;
pub mod markers;
pub mod store;

pub use bus::{EventBus, InMemoryBus, LogoutNotice};
pub use clock::{Clock, ManualClock, format_mm_ss, remaining_ms};
pub use coordinator::{LogoutCoordinator, LogoutEffects, LogoutOutcome, LogoutPhase};
pub use error::{BusError, SignOutError, StoreError};
pub use expiry::{ExpiryConfig, ExpiryStatus, expiry_status};
pub use inactivity::{
    ForceLogoutReason, InactivityConfig, InactivityMonitor, ResumeDecision, Tick, evaluate_resume,
};
pub use markers::{ResumeMarkers, SessionMarkers, clear_auth_artifacts};
pub use store::{KeyValueStore, MemoryStore};

use serde::{Deserialize, Serialize};

/// Session summary as returned by the token issuer.
///
/// This mirrors the server's session read and carries no secrets; the
/// monitors only need the expiry instant and the remember-me flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Subject identifier (user id).
    pub subject: String,
    /// Absolute expiry as Unix seconds.
    pub expires_at: i64,
    /// Remember-me sessions persist across browser restarts and are exempt
    /// from inactivity logout.
    pub remember_me: bool,
}

impl SessionSnapshot {
    /// Expiry instant in Unix milliseconds for countdown math.
    #[must_use]
    pub fn expires_at_ms(&self) -> i64 {
        self.expires_at.saturating_mul(1000)
    }
}
