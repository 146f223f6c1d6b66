//! Token top-up plans and entitlement prices purchasable through checkout.

use serde::{Deserialize, Serialize};
use shared_types::Money;

/// Price of the untimed `buyer_pro` entitlement.
pub const BUYER_PRO_PRICE: Money = Money::from_cents(19_99);

/// Price of one 30-day `seller_plus` term.
pub const SELLER_PLUS_PRICE: Money = Money::from_cents(29_99);

/// One purchasable token bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPlan {
    pub name: String,
    pub tokens: u64,
    pub price: Money,
}

/// The catalog of token plans the checkout flow may sell.
///
/// Plan names travel through checkout metadata, so resolution must fail
/// soft: an event naming a plan that no longer exists is not an error, it
/// is an acknowledged no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPlanCatalog {
    plans: Vec<TokenPlan>,
}

impl TokenPlanCatalog {
    pub fn new(plans: Vec<TokenPlan>) -> Self {
        Self { plans }
    }

    pub fn resolve(&self, name: &str) -> Option<&TokenPlan> {
        self.plans.iter().find(|plan| plan.name == name)
    }
}

impl Default for TokenPlanCatalog {
    fn default() -> Self {
        Self::new(vec![
            TokenPlan {
                name: "starter".to_string(),
                tokens: 50,
                price: Money::from_cents(9_99),
            },
            TokenPlan {
                name: "practice".to_string(),
                tokens: 150,
                price: Money::from_cents(24_99),
            },
            TokenPlan {
                name: "clinic".to_string(),
                tokens: 400,
                price: Money::from_cents(59_99),
            },
        ])
    }
}
