use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, PaymentId};

/// Audit entry written when a payment-driven token grant is applied.
///
/// The `payment_id` doubles as the idempotency key: a replayed delivery of
/// the same payment event finds the record and skips the credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantAuditRecord {
    pub payment_id: PaymentId,
    pub account_id: AccountId,
    /// Name of the purchased token plan.
    pub plan: String,
    /// Tokens credited by this grant.
    pub tokens: u64,
    pub recorded_at: DateTime<Utc>,
}
