use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, EntitlementId};

/// Days a `seller_plus` grant stays live before it must be repurchased.
pub const SELLER_PLUS_TERM_DAYS: i64 = 30;

/// The premium capability a grant unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementKind {
    /// Buyer-side premium features. Untimed.
    BuyerPro,
    /// Seller-side premium features plus listing promotion. Time-boxed.
    SellerPlus,
}

impl EntitlementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntitlementKind::BuyerPro => "buyer_pro",
            EntitlementKind::SellerPlus => "seller_plus",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementStatus {
    Active,
    Expired,
}

/// One grant of a premium capability to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    pub id: EntitlementId,
    pub account_id: AccountId,
    pub kind: EntitlementKind,
    pub status: EntitlementStatus,
    pub activated_at: DateTime<Utc>,
    /// `None` for untimed grants; `buyer_pro` never lapses on its own.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Entitlement {
    pub fn buyer_pro(account_id: AccountId, now: DateTime<Utc>) -> Self {
        Self {
            id: EntitlementId::new(),
            account_id,
            kind: EntitlementKind::BuyerPro,
            status: EntitlementStatus::Active,
            activated_at: now,
            expires_at: None,
        }
    }

    pub fn seller_plus(account_id: AccountId, now: DateTime<Utc>) -> Self {
        Self {
            id: EntitlementId::new(),
            account_id,
            kind: EntitlementKind::SellerPlus,
            status: EntitlementStatus::Active,
            activated_at: now,
            expires_at: Some(now + Duration::days(SELLER_PLUS_TERM_DAYS)),
        }
    }

    /// Whether the grant currently confers its capability.
    ///
    /// An `Active` row whose expiry passed counts as not live even before
    /// anything flips its status column.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.status == EntitlementStatus::Active
            && self.expires_at.map_or(true, |expiry| expiry > now)
    }
}
