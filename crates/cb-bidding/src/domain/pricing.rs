//! Bid pricing: how many tokens one bid on a project costs.
//!
//! The mapping from budget to cost must be a pure function of the tier
//! table so the submission path and any later server-side verification
//! price the same budget identically.
//!
//! Unknown or degenerate inputs fail closed: whatever the table looks
//! like, a bid never costs zero tokens.

use shared_types::Money;
use thiserror::Error;

/// One pricing band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTier {
    /// Exclusive upper bound on the budget; `None` marks the open-ended
    /// top tier. A budget exactly on a bound prices into the next tier.
    pub below: Option<Money>,
    /// Tokens one bid costs inside this band.
    pub tokens: u64,
}

/// Why a tier table was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("pricing table has no tiers")]
    Empty,

    #[error("pricing tiers must be sorted by ascending bound")]
    UnorderedTiers,

    #[error("pricing table must end with one open-ended tier")]
    MissingOpenTier,

    #[error("a bid may never be free: tier with zero tokens")]
    FreeTier,
}

/// Ordered tier table mapping a project budget to a token cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingTable {
    tiers: Vec<PriceTier>,
}

impl PricingTable {
    /// Builds a table after checking its shape: ascending bounds, exactly
    /// one open-ended tier in the last position, no free tier.
    pub fn new(tiers: Vec<PriceTier>) -> Result<Self, PricingError> {
        let Some((last, bounded)) = tiers.split_last() else {
            return Err(PricingError::Empty);
        };
        if tiers.iter().any(|tier| tier.tokens == 0) {
            return Err(PricingError::FreeTier);
        }
        if last.below.is_some() {
            return Err(PricingError::MissingOpenTier);
        }
        let mut previous = Money::ZERO;
        for tier in bounded {
            let Some(bound) = tier.below else {
                return Err(PricingError::MissingOpenTier);
            };
            if bound <= previous {
                return Err(PricingError::UnorderedTiers);
            }
            previous = bound;
        }
        Ok(Self { tiers })
    }

    /// Tokens required to place one bid on a project with this budget.
    ///
    /// Total and deterministic. A zero budget prices into the lowest tier,
    /// and the floor of one token holds no matter what the table says.
    pub fn tokens_required(&self, budget: Money) -> u64 {
        for tier in &self.tiers {
            match tier.below {
                Some(bound) if budget < bound => return tier.tokens.max(1),
                Some(_) => continue,
                None => return tier.tokens.max(1),
            }
        }
        1
    }
}

impl Default for PricingTable {
    /// Marketplace default bands.
    fn default() -> Self {
        Self::new(vec![
            PriceTier {
                below: Some(Money::from_dollars(250)),
                tokens: 1,
            },
            PriceTier {
                below: Some(Money::from_dollars(1_000)),
                tokens: 2,
            },
            PriceTier {
                below: Some(Money::from_dollars(5_000)),
                tokens: 3,
            },
            PriceTier {
                below: Some(Money::from_dollars(20_000)),
                tokens: 5,
            },
            PriceTier {
                below: None,
                tokens: 8,
            },
        ])
        .expect("default pricing table is well-formed")
    }
}
