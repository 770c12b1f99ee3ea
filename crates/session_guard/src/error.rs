use thiserror::Error;

/// Storage failures are expected (private browsing, quota) and never fatal;
/// callers log them and continue.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage write rejected for {key}: {reason}")]
    WriteRejected { key: String, reason: String },
    #[error("storage unavailable")]
    Unavailable,
}

/// Broadcast failures leave sibling tabs to their own timers; non-fatal.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("broadcast failed: {0}")]
pub struct BusError(pub String);

/// Remote sign-out failures must not block the local logout sequence.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("sign-out failed: {0}")]
pub struct SignOutError(pub String);
