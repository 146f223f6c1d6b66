//! Payment-completion events, as delivered by the provider webhook.
//!
//! Deliveries arrive at least once and carry back the metadata stamped at
//! checkout-session creation. Nothing here is trusted until the gateway
//! has verified the delivery's signature against the raw body.

use serde::{Deserialize, Serialize};
use shared_types::{AccountId, PaymentId};

/// Purchase type tags echoed through checkout metadata.
pub mod purchase_types {
    pub const TOKENS: &str = "tokens";
    pub const BUYER_PRO: &str = "buyer_pro";
    pub const SELLER_PLUS: &str = "seller_plus";
}

/// The metadata bag stamped onto a checkout session and echoed back in the
/// completion event. Every field is optional on the wire; classification
/// decides what is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventMetadata {
    #[serde(rename = "type")]
    pub purchase_type: Option<String>,
    pub account_id: Option<AccountId>,
    pub plan: Option<String>,
}

/// One completed-checkout notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEvent {
    /// The provider's unique id for the payment; the idempotency key for
    /// token grants.
    pub payment_id: PaymentId,
    /// What the provider reports as paid, in cents.
    #[serde(default)]
    pub amount_cents: Option<u64>,
    #[serde(default)]
    pub metadata: EventMetadata,
}

/// What an event asks the reconciler to do, once its metadata checks out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Purchase {
    Tokens { account_id: AccountId, plan: String },
    BuyerPro { account_id: AccountId },
    SellerPlus { account_id: AccountId },
}

impl PaymentEvent {
    /// Classifies the metadata bag.
    ///
    /// `None` means the event is not addressed to this system (missing
    /// account, missing plan on a token purchase, or an unknown type tag)
    /// and must be acknowledged untouched so the provider stops retrying.
    pub fn purchase(&self) -> Option<Purchase> {
        let account_id = self.metadata.account_id.clone()?;
        match self.metadata.purchase_type.as_deref() {
            Some(purchase_types::TOKENS) => {
                let plan = self.metadata.plan.clone()?;
                Some(Purchase::Tokens { account_id, plan })
            }
            Some(purchase_types::BUYER_PRO) => Some(Purchase::BuyerPro { account_id }),
            Some(purchase_types::SELLER_PLUS) => Some(Purchase::SellerPlus { account_id }),
            _ => None,
        }
    }
}
