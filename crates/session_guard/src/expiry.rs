//! Token-expiry status, independent of inactivity.

const DEFAULT_WARN_THRESHOLD_MS: i64 = 5 * 60 * 1000;
const DEFAULT_RECOMPUTE_INTERVAL_MS: i64 = 60 * 1000;

/// Timing knobs for the expiry notifier. Defaults: warn at 5 min remaining,
/// recompute every 60 s.
#[derive(Clone, Copy, Debug)]
pub struct ExpiryConfig {
    warn_threshold_ms: i64,
    recompute_interval_ms: i64,
}

impl ExpiryConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            warn_threshold_ms: DEFAULT_WARN_THRESHOLD_MS,
            recompute_interval_ms: DEFAULT_RECOMPUTE_INTERVAL_MS,
        }
    }

    #[must_use]
    pub fn with_warn_threshold_ms(mut self, ms: i64) -> Self {
        self.warn_threshold_ms = ms;
        self
    }

    #[must_use]
    pub fn with_recompute_interval_ms(mut self, ms: i64) -> Self {
        self.recompute_interval_ms = ms;
        self
    }

    #[must_use]
    pub fn warn_threshold_ms(&self) -> i64 {
        self.warn_threshold_ms
    }

    #[must_use]
    pub fn recompute_interval_ms(&self) -> i64 {
        self.recompute_interval_ms
    }
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the session stands relative to its absolute expiry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpiryStatus {
    Active { remaining_ms: i64 },
    /// Inside the warning window; offer "extend" and "sign out".
    Expiring { remaining_ms: i64 },
    /// Already expired. Display only; navigation stays with the logout
    /// coordinator.
    Expired,
}

/// Pure status computation; the caller re-runs it on the recompute cadence.
#[must_use]
pub fn expiry_status(config: &ExpiryConfig, now_ms: i64, expires_at_ms: i64) -> ExpiryStatus {
    let remaining_ms = expires_at_ms.saturating_sub(now_ms);
    if remaining_ms <= 0 {
        ExpiryStatus::Expired
    } else if remaining_ms <= config.warn_threshold_ms() {
        ExpiryStatus::Expiring { remaining_ms }
    } else {
        ExpiryStatus::Active { remaining_ms }
    }
}

#[cfg(test)]
mod tests {
    use super::{ExpiryConfig, ExpiryStatus, expiry_status};

    const MINUTE_MS: i64 = 60 * 1000;

    #[test]
    fn active_above_threshold() {
        let status = expiry_status(&ExpiryConfig::new(), 0, 5 * MINUTE_MS + 1);
        assert_eq!(
            status,
            ExpiryStatus::Active {
                remaining_ms: 5 * MINUTE_MS + 1
            }
        );
    }

    #[test]
    fn expiring_at_exactly_five_minutes() {
        let status = expiry_status(&ExpiryConfig::new(), 0, 5 * MINUTE_MS);
        assert_eq!(
            status,
            ExpiryStatus::Expiring {
                remaining_ms: 5 * MINUTE_MS
            }
        );
    }

    #[test]
    fn expired_at_zero_and_past() {
        assert_eq!(
            expiry_status(&ExpiryConfig::new(), 10_000, 10_000),
            ExpiryStatus::Expired
        );
        assert_eq!(
            expiry_status(&ExpiryConfig::new(), 20_000, 10_000),
            ExpiryStatus::Expired
        );
    }

    #[test]
    fn recompute_cadence_defaults_to_a_minute() {
        assert_eq!(ExpiryConfig::new().recompute_interval_ms(), MINUTE_MS);
    }

    #[test]
    fn sixty_second_cadence_crosses_threshold_correctly() {
        let config = ExpiryConfig::new();
        let expires_at = 6 * MINUTE_MS;
        // Successive one-minute recomputes: active, then expiring, then expired.
        assert!(matches!(
            expiry_status(&config, 0, expires_at),
            ExpiryStatus::Active { .. }
        ));
        assert!(matches!(
            expiry_status(&config, MINUTE_MS, expires_at),
            ExpiryStatus::Expiring { .. }
        ));
        assert_eq!(
            expiry_status(&config, 6 * MINUTE_MS, expires_at),
            ExpiryStatus::Expired
        );
    }
}
