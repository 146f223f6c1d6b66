use crate::domain::errors::CheckoutError;
use serde::{Deserialize, Serialize};
use shared_types::AccountId;
use thiserror::Error;

/// Failure of the best-effort listing promotion.
#[derive(Debug, Clone, Error)]
#[error("listing promotion failed: {0}")]
pub struct PromoteError(pub String);

/// Downstream hook fired after a `seller_plus` activation.
///
/// Strictly best-effort: the reconciler logs a failure and still
/// acknowledges the payment. Implementations must not assume they run at
/// most once per activation.
pub trait ListingPromoter: Send + Sync {
    fn feature_listings(&self, account: &AccountId) -> Result<(), PromoteError>;
}

/// What the caller wants to buy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckoutRequest {
    /// One of the [`crate::domain::events::purchase_types`] tags.
    #[serde(rename = "type")]
    pub purchase_type: String,
    pub account_id: AccountId,
    /// Required for token purchases, ignored otherwise.
    pub plan: Option<String>,
}

/// A started purchase flow at the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSession {
    pub session_id: String,
    /// Where to send the buyer's browser.
    pub redirect_url: String,
}

/// Outbound call to the payment provider to start a purchase flow.
///
/// The metadata stamped here comes back verbatim in the completion event,
/// so this is the only place purchase type, account, and plan get bound
/// together.
pub trait CheckoutProvider: Send + Sync {
    fn create_session(&self, request: &CheckoutRequest) -> Result<CheckoutSession, CheckoutError>;
}
