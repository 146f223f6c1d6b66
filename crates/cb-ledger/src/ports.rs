use crate::domain::entities::GrantAuditRecord;
use crate::domain::errors::LedgerError;
use shared_types::{AccountId, PaymentId};

/// Durable per-account token balances.
///
/// The debit is the concurrency-sensitive operation: implementations must
/// apply `try_debit` as one conditional update (`balance = balance - amount`
/// only if `balance >= amount`), never as a read followed by a write. Both
/// the bid workflow and the webhook path mutate balances concurrently, and
/// neither can assume the other is quiescent.
pub trait LedgerStore: Send + Sync {
    /// Current balance. Accounts that were never credited hold zero.
    fn balance(&self, account: &AccountId) -> Result<u64, LedgerError>;

    /// Unconditional increment. Returns the new balance.
    fn credit(&self, account: &AccountId, amount: u64) -> Result<u64, LedgerError>;

    /// Conditional decrement. Returns the new balance, or
    /// [`LedgerError::InsufficientTokens`] without mutating anything.
    fn try_debit(&self, account: &AccountId, amount: u64) -> Result<u64, LedgerError>;
}

/// Append-only audit log of applied token grants, keyed by payment id.
pub trait GrantAuditLog: Send + Sync {
    /// Claims the payment id and stores the record if it has not been seen.
    ///
    /// Returns `true` when the record was inserted, `false` when a record
    /// with the same payment id already exists and nothing was written.
    fn record_if_absent(&self, record: GrantAuditRecord) -> Result<bool, LedgerError>;

    /// The audit record for a payment, if any.
    fn find(&self, payment_id: &PaymentId) -> Result<Option<GrantAuditRecord>, LedgerError>;

    /// All grants recorded for an account, oldest first.
    fn records_for(&self, account: &AccountId) -> Result<Vec<GrantAuditRecord>, LedgerError>;
}
