//! Single-flight logout coordination.
//!
//! One coordinator exists per tab. Any trigger — explicit click, inactivity
//! timeout, tab-close beacon, cross-tab notice — funnels into
//! [`LogoutCoordinator::run`]; a second trigger while a run is in flight
//! attaches to that run's outcome instead of racing it.

use std::cell::Cell;

use async_trait::async_trait;

use crate::bus::LogoutNotice;
use crate::clock::Clock;
use crate::error::{BusError, SignOutError};

/// Logout sequence phases. `Redirecting` is terminal; the page unloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogoutPhase {
    Idle,
    InProgress,
    Redirecting,
}

/// What a caller's trigger amounted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// This call executed the sequence.
    Completed,
    /// Another trigger already owns the sequence; nothing was re-run.
    AlreadyInFlight,
}

/// Side effects of the logout sequence, injected so the sequence itself is
/// testable without a browser.
#[async_trait(?Send)]
pub trait LogoutEffects {
    /// Tell sibling tabs a logout is underway (broadcast channel plus the
    /// shared-storage flag fallback).
    fn broadcast(&self, notice: &LogoutNotice) -> Result<(), BusError>;
    /// Remove every client-held auth artifact: marker keys, remember-me
    /// flag, non-protected cookies. Must swallow storage failures.
    fn clear_client_state(&self);
    /// Invalidate the session at the token issuer, without a redirect.
    async fn sign_out(&self) -> Result<(), SignOutError>;
    /// Hard navigation to the post-logout destination.
    fn navigate(&self, destination: &str);
}

/// Per-tab logout state machine.
pub struct LogoutCoordinator<C> {
    clock: C,
    phase: Cell<LogoutPhase>,
}

impl<C: Clock> LogoutCoordinator<C> {
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            phase: Cell::new(LogoutPhase::Idle),
        }
    }

    #[must_use]
    pub fn phase(&self) -> LogoutPhase {
        self.phase.get()
    }

    /// Claim the sequence. Only the first caller since `Idle` wins.
    pub fn try_begin(&self) -> bool {
        if self.phase.get() == LogoutPhase::Idle {
            self.phase.set(LogoutPhase::InProgress);
            true
        } else {
            false
        }
    }

    /// Execute the logout sequence once, no matter how many triggers fire.
    ///
    /// Order matters: the broadcast goes out first so sibling tabs start
    /// their own (idempotent) sequences even if this tab's sign-out call
    /// stalls; the client state is cleared before the remote sign-out so a
    /// failing network call can never leave a half-authenticated client; the
    /// navigation always happens.
    pub async fn run<E: LogoutEffects>(&self, effects: &E, destination: &str) -> LogoutOutcome {
        if !self.try_begin() {
            return LogoutOutcome::AlreadyInFlight;
        }

        let notice = LogoutNotice::new(self.clock.now_ms(), destination);
        // Broadcast and sign-out failures are deliberately dropped here;
        // the embedding layer logs them.
        let _ = effects.broadcast(&notice);
        effects.clear_client_state();
        let _ = effects.sign_out().await;

        self.phase.set(LogoutPhase::Redirecting);
        effects.navigate(destination);
        LogoutOutcome::Completed
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use async_trait::async_trait;

    use super::{LogoutCoordinator, LogoutEffects, LogoutOutcome, LogoutPhase};
    use crate::bus::LogoutNotice;
    use crate::clock::ManualClock;
    use crate::error::{BusError, SignOutError};

    #[derive(Default)]
    struct CountingEffects {
        broadcasts: RefCell<Vec<LogoutNotice>>,
        clears: Cell<usize>,
        sign_outs: Cell<usize>,
        navigations: RefCell<Vec<String>>,
        fail_sign_out: bool,
        fail_broadcast: bool,
    }

    #[async_trait(?Send)]
    impl LogoutEffects for CountingEffects {
        fn broadcast(&self, notice: &LogoutNotice) -> Result<(), BusError> {
            self.broadcasts.borrow_mut().push(notice.clone());
            if self.fail_broadcast {
                return Err(BusError("channel closed".to_string()));
            }
            Ok(())
        }

        fn clear_client_state(&self) {
            self.clears.set(self.clears.get() + 1);
        }

        async fn sign_out(&self) -> Result<(), SignOutError> {
            // Yield so concurrently started runs interleave like real
            // network calls do.
            tokio::task::yield_now().await;
            self.sign_outs.set(self.sign_outs.get() + 1);
            if self.fail_sign_out {
                return Err(SignOutError("503".to_string()));
            }
            Ok(())
        }

        fn navigate(&self, destination: &str) {
            self.navigations.borrow_mut().push(destination.to_string());
        }
    }

    #[tokio::test]
    async fn sequence_runs_in_order() {
        let coordinator = LogoutCoordinator::new(ManualClock::new(1_000));
        let effects = CountingEffects::default();

        let outcome = coordinator.run(&effects, "/login").await;

        assert_eq!(outcome, LogoutOutcome::Completed);
        assert_eq!(coordinator.phase(), LogoutPhase::Redirecting);
        assert_eq!(effects.broadcasts.borrow().len(), 1);
        assert_eq!(effects.broadcasts.borrow()[0].at_ms, 1_000);
        assert_eq!(effects.clears.get(), 1);
        assert_eq!(effects.sign_outs.get(), 1);
        assert_eq!(*effects.navigations.borrow(), vec!["/login".to_string()]);
    }

    #[tokio::test]
    async fn concurrent_triggers_share_one_run() {
        let coordinator = LogoutCoordinator::new(ManualClock::new(0));
        let effects = CountingEffects::default();

        let (first, second) = tokio::join!(
            coordinator.run(&effects, "/login"),
            coordinator.run(&effects, "/login"),
        );

        assert_eq!(first, LogoutOutcome::Completed);
        assert_eq!(second, LogoutOutcome::AlreadyInFlight);
        assert_eq!(effects.sign_outs.get(), 1);
        assert_eq!(effects.navigations.borrow().len(), 1);
        assert_eq!(effects.clears.get(), 1);
    }

    #[tokio::test]
    async fn trigger_after_completion_stays_idempotent() {
        let coordinator = LogoutCoordinator::new(ManualClock::new(0));
        let effects = CountingEffects::default();

        let first = coordinator.run(&effects, "/login").await;
        let second = coordinator.run(&effects, "/login").await;

        assert_eq!(first, LogoutOutcome::Completed);
        assert_eq!(second, LogoutOutcome::AlreadyInFlight);
        assert_eq!(effects.sign_outs.get(), 1);
        assert_eq!(effects.navigations.borrow().len(), 1);
    }

    #[tokio::test]
    async fn sign_out_failure_still_clears_and_navigates() {
        let coordinator = LogoutCoordinator::new(ManualClock::new(0));
        let effects = CountingEffects {
            fail_sign_out: true,
            ..CountingEffects::default()
        };

        let outcome = coordinator.run(&effects, "/login").await;

        assert_eq!(outcome, LogoutOutcome::Completed);
        assert_eq!(effects.clears.get(), 1);
        assert_eq!(effects.navigations.borrow().len(), 1);
        assert_eq!(coordinator.phase(), LogoutPhase::Redirecting);
    }

    #[tokio::test]
    async fn broadcast_failure_does_not_abort_sequence() {
        let coordinator = LogoutCoordinator::new(ManualClock::new(0));
        let effects = CountingEffects {
            fail_broadcast: true,
            ..CountingEffects::default()
        };

        let outcome = coordinator.run(&effects, "/login").await;

        assert_eq!(outcome, LogoutOutcome::Completed);
        assert_eq!(effects.clears.get(), 1);
        assert_eq!(effects.sign_outs.get(), 1);
        assert_eq!(effects.navigations.borrow().len(), 1);
    }
}
