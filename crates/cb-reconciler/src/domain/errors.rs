use cb_entitlements::EntitlementError;
use cb_ledger::LedgerError;
use thiserror::Error;

/// Reconciliation failures.
///
/// Every variant is retryable from the provider's point of view: the
/// webhook endpoint maps it to a 5xx so the delivery comes back. Benign
/// conditions (already applied, not ours) are not errors, they are
/// [`crate::service::Disposition`] values.
#[derive(Debug, Clone, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Entitlements(#[from] EntitlementError),
}

/// Errors creating a checkout session.
#[derive(Debug, Clone, Error)]
pub enum CheckoutError {
    #[error("unknown purchase type: {0}")]
    UnknownPurchaseType(String),

    #[error("unknown token plan: {0}")]
    UnknownPlan(String),

    #[error("a token purchase must name a plan")]
    MissingPlan,

    #[error("account id is required")]
    MissingAccount,

    #[error("checkout provider error: {0}")]
    Provider(String),
}
