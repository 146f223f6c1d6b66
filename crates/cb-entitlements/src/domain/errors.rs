use thiserror::Error;

/// Errors from entitlement reads and writes.
#[derive(Debug, Clone, Error)]
pub enum EntitlementError {
    /// A store lock was poisoned by a panicking writer.
    #[error("entitlement lock poisoned")]
    LockPoisoned,

    /// Underlying store failure.
    #[error("entitlement store error: {0}")]
    Store(String),
}
