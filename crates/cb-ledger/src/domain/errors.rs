use thiserror::Error;

/// Errors from ledger reads and writes.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// Debit rejected: it would take the balance below zero.
    #[error("insufficient tokens: need {required}, have {available}")]
    InsufficientTokens { required: u64, available: u64 },

    /// A balance lock was poisoned by a panicking writer.
    #[error("ledger lock poisoned")]
    LockPoisoned,

    /// Underlying store failure.
    #[error("ledger store error: {0}")]
    Store(String),
}
