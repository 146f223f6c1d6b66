//! Bid submission workflow.

use crate::domain::entities::{
    Bid, BidDecision, BidReceipt, BidStatus, SubmitBidRequest, MIN_BID_MESSAGE_LEN,
};
use crate::domain::errors::BidError;
use crate::domain::pricing::PricingTable;
use crate::ports::{BidStore, ProjectCatalog};
use cb_ledger::{LedgerError, LedgerStore};
use chrono::Utc;
use shared_types::{AccountId, BidId, ProjectId};
use std::sync::Arc;
use tracing::{error, info};

/// Orchestrates spending tokens to create a bid.
///
/// Per-attempt step order: validate, load project, advisory duplicate
/// check, atomic conditional debit, unique insert. The debit and the
/// insert are each a single store-level operation; the only cross-step
/// repair needed is crediting the debit back when the insert loses a
/// same-pair race.
pub struct BidService {
    bids: Arc<dyn BidStore>,
    catalog: Arc<dyn ProjectCatalog>,
    ledger: Arc<dyn LedgerStore>,
    pricing: PricingTable,
}

impl BidService {
    pub fn new(
        bids: Arc<dyn BidStore>,
        catalog: Arc<dyn ProjectCatalog>,
        ledger: Arc<dyn LedgerStore>,
        pricing: PricingTable,
    ) -> Self {
        Self {
            bids,
            catalog,
            ledger,
            pricing,
        }
    }

    /// Submits a bid, debiting the seller's balance by the cost priced off
    /// the project's budget.
    ///
    /// Every failure before the debit leaves no side effect. A failure
    /// after the debit (losing the uniqueness race) is compensated with a
    /// credit before the error is returned.
    pub fn submit(&self, request: SubmitBidRequest) -> Result<BidReceipt, BidError> {
        validate(&request)?;

        let project = self
            .catalog
            .get(&request.project_id)?
            .ok_or_else(|| BidError::ProjectNotFound(request.project_id.clone()))?;
        if !project.open {
            return Err(BidError::ProjectClosed(project.id));
        }
        if project.owner_id == request.seller_id {
            return Err(BidError::Validation(
                "sellers cannot bid on their own project".to_string(),
            ));
        }

        // Advisory duplicate check against the durable store, immediately
        // before mutation. The store constraint in insert_unique closes the
        // race this check cannot.
        if self
            .bids
            .get(&request.project_id, &request.seller_id)?
            .is_some()
        {
            return Err(BidError::DuplicateBid {
                project_id: request.project_id,
                seller_id: request.seller_id,
            });
        }

        let cost = self.pricing.tokens_required(project.budget);
        let remaining = match self.ledger.try_debit(&request.seller_id, cost) {
            Ok(balance) => balance,
            Err(LedgerError::InsufficientTokens {
                required,
                available,
            }) => {
                return Err(BidError::InsufficientTokens {
                    required,
                    available,
                })
            }
            Err(other) => return Err(BidError::Store(other.to_string())),
        };

        let bid = Bid {
            id: BidId::new(),
            project_id: request.project_id.clone(),
            seller_id: request.seller_id.clone(),
            amount: request.amount,
            message: request.message,
            delivery_estimate_days: request.delivery_estimate_days,
            status: BidStatus::Pending,
            tokens_spent: cost,
            created_at: Utc::now(),
        };
        let bid_id = bid.id;

        if let Err(err) = self.bids.insert_unique(bid) {
            // Lost the same-pair race after the debit: put the tokens back.
            if let Err(refund) = self.ledger.credit(&request.seller_id, cost) {
                error!(
                    seller = %request.seller_id,
                    tokens = cost,
                    error = %refund,
                    "failed to refund debit after losing bid uniqueness race"
                );
            }
            return Err(err);
        }

        info!(
            bid = %bid_id,
            project = %request.project_id,
            seller = %request.seller_id,
            tokens = cost,
            "bid submitted"
        );

        Ok(BidReceipt {
            bid_id,
            tokens_spent: cost,
            remaining_balance: remaining,
        })
    }

    /// Applies the project owner's accept/reject to a pending bid.
    pub fn decide(
        &self,
        decider: &AccountId,
        bid_id: &BidId,
        decision: BidDecision,
    ) -> Result<Bid, BidError> {
        let bid = self
            .bids
            .get_by_id(bid_id)?
            .ok_or(BidError::BidNotFound(*bid_id))?;
        let project = self
            .catalog
            .get(&bid.project_id)?
            .ok_or_else(|| BidError::ProjectNotFound(bid.project_id.clone()))?;

        if &project.owner_id != decider {
            return Err(BidError::NotProjectOwner);
        }
        if bid.status != BidStatus::Pending {
            return Err(BidError::AlreadyDecided);
        }

        let status = match decision {
            BidDecision::Accept => BidStatus::Accepted,
            BidDecision::Reject => BidStatus::Rejected,
        };
        self.bids.update_status(bid_id, status)?;

        info!(bid = %bid_id, status = ?status, "bid decided");
        Ok(Bid { status, ..bid })
    }

    /// All bids on a project, for the owner's review screen.
    pub fn bids_for_project(&self, project: &ProjectId) -> Result<Vec<Bid>, BidError> {
        self.bids.bids_for_project(project)
    }
}

fn validate(request: &SubmitBidRequest) -> Result<(), BidError> {
    if request.seller_id.as_str().is_empty() {
        return Err(BidError::Validation("seller id is required".to_string()));
    }
    if request.project_id.as_str().is_empty() {
        return Err(BidError::Validation("project id is required".to_string()));
    }
    if request.amount.is_zero() {
        return Err(BidError::Validation(
            "amount must be greater than zero".to_string(),
        ));
    }
    if request.message.chars().count() < MIN_BID_MESSAGE_LEN {
        return Err(BidError::Validation(format!(
            "message must be at least {MIN_BID_MESSAGE_LEN} characters"
        )));
    }
    if request.delivery_estimate_days == 0 {
        return Err(BidError::Validation(
            "delivery estimate must be at least one day".to_string(),
        ));
    }
    Ok(())
}
