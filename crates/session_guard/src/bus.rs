//! Cross-tab logout notices.
//!
//! The frontend publishes over a broadcast channel with a shared-storage
//! write as fallback; tests substitute [`InMemoryBus`]. Receiving tabs feed
//! the notice into their own logout coordinator rather than clearing state
//! directly, so single-flight holds per tab.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::error::BusError;

/// Wire form of a logout broadcast. Carries the decision instant so stale
/// notices can be ignored after the flag TTL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutNotice {
    /// When the logout was decided, Unix milliseconds.
    pub at_ms: i64,
    /// Post-logout destination path.
    pub destination: String,
}

impl LogoutNotice {
    #[must_use]
    pub fn new(at_ms: i64, destination: impl Into<String>) -> Self {
        Self {
            at_ms,
            destination: destination.into(),
        }
    }

    /// Notices older than `ttl_ms` are leftovers of an earlier logout and
    /// must be ignored.
    #[must_use]
    pub fn is_stale(&self, now_ms: i64, ttl_ms: i64) -> bool {
        now_ms.saturating_sub(self.at_ms) > ttl_ms
    }

    /// Serialize for the broadcast channel / storage fallback.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a received payload; `None` for anything malformed, since a
    /// garbled notice must never trigger a logout.
    #[must_use]
    pub fn from_json(payload: &str) -> Option<Self> {
        serde_json::from_str(payload).ok()
    }
}

/// Publish side of the cross-tab channel.
pub trait EventBus {
    /// Best-effort publish; failures are logged by the caller and never
    /// block the logout sequence.
    fn publish(&self, notice: &LogoutNotice) -> Result<(), BusError>;
}

/// Recording bus for tests.
#[derive(Debug, Default)]
pub struct InMemoryBus {
    published: RefCell<Vec<LogoutNotice>>,
}

impl InMemoryBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.published.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.published.borrow().is_empty()
    }

    /// Take every notice published so far.
    pub fn drain(&self) -> Vec<LogoutNotice> {
        self.published.borrow_mut().drain(..).collect()
    }
}

impl EventBus for InMemoryBus {
    fn publish(&self, notice: &LogoutNotice) -> Result<(), BusError> {
        self.published.borrow_mut().push(notice.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{EventBus, InMemoryBus, LogoutNotice};

    #[test]
    fn notice_staleness_uses_ttl() {
        let notice = LogoutNotice::new(10_000, "/login");
        assert!(!notice.is_stale(10_000, 30_000));
        assert!(!notice.is_stale(40_000, 30_000));
        assert!(notice.is_stale(40_001, 30_000));
    }

    #[test]
    fn notice_round_trips_through_json() {
        let notice = LogoutNotice::new(42, "/login");
        let json = notice.to_json().expect("serialize notice");
        assert_eq!(LogoutNotice::from_json(&json), Some(notice));
    }

    #[test]
    fn malformed_payload_parses_to_none() {
        assert_eq!(LogoutNotice::from_json("not json"), None);
        assert_eq!(LogoutNotice::from_json("{}"), None);
    }

    #[test]
    fn in_memory_bus_records_and_drains() {
        let bus = InMemoryBus::new();
        assert!(bus.is_empty());
        bus.publish(&LogoutNotice::new(1, "/login")).expect("publish");
        bus.publish(&LogoutNotice::new(2, "/login")).expect("publish");
        assert_eq!(bus.len(), 2);

        let drained = bus.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].at_ms, 1);
        assert!(bus.is_empty());
    }
}
