use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, BidId, Money, ProjectId};

/// Minimum length of a bid pitch message, in characters.
pub const MIN_BID_MESSAGE_LEN: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidStatus {
    Pending,
    Accepted,
    Rejected,
}

/// The project owner's verdict on a pending bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidDecision {
    Accept,
    Reject,
}

/// A seller's proposal against a buyer's project.
///
/// Created once by the submission workflow; only `status` changes after
/// that, and only through the owner's accept/reject. Rows are never
/// deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub id: BidId,
    pub project_id: ProjectId,
    pub seller_id: AccountId,
    /// What the seller proposes to charge for the work.
    pub amount: Money,
    pub message: String,
    pub delivery_estimate_days: u32,
    pub status: BidStatus,
    /// Tokens debited when this bid was created.
    pub tokens_spent: u64,
    pub created_at: DateTime<Utc>,
}

/// A buyer's project as the bidding workflow sees it.
///
/// The budget is the server-authoritative input to bid pricing; the
/// workflow never prices off a budget supplied in the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectListing {
    pub id: ProjectId,
    pub owner_id: AccountId,
    pub title: String,
    pub budget: Money,
    /// Set for sellers with a live `seller_plus` grant.
    pub featured: bool,
    /// Closed projects no longer take bids.
    pub open: bool,
}

/// Input to [`crate::service::BidService::submit`].
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitBidRequest {
    pub project_id: ProjectId,
    pub seller_id: AccountId,
    pub amount: Money,
    pub message: String,
    pub delivery_estimate_days: u32,
}

/// What a successful submission hands back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct BidReceipt {
    pub bid_id: BidId,
    pub tokens_spent: u64,
    pub remaining_balance: u64,
}
