use shared_types::{AccountId, BidId, ProjectId};
use thiserror::Error;

/// Everything that can go wrong submitting or deciding a bid.
///
/// Variants are deliberately distinct per failure class: callers route
/// insufficiency to a top-up flow, duplicates to a "you already bid"
/// notice, and validation straight back to the form.
#[derive(Debug, Clone, Error)]
pub enum BidError {
    /// Request failed a field-level check. Never retried.
    #[error("invalid bid: {0}")]
    Validation(String),

    /// The target project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The target project no longer takes bids.
    #[error("project is closed for bids: {0}")]
    ProjectClosed(ProjectId),

    /// The `(project, seller)` pair already has a bid.
    #[error("seller {seller_id} already bid on project {project_id}")]
    DuplicateBid {
        project_id: ProjectId,
        seller_id: AccountId,
    },

    /// Not enough tokens to cover the bid cost. Nothing was debited.
    #[error("insufficient tokens: need {required}, have {available}")]
    InsufficientTokens { required: u64, available: u64 },

    /// No bid with the given id.
    #[error("bid not found: {0}")]
    BidNotFound(BidId),

    /// Only the project owner may accept or reject a bid.
    #[error("only the project owner may decide a bid")]
    NotProjectOwner,

    /// The bid already left `Pending`; decisions are terminal.
    #[error("bid has already been decided")]
    AlreadyDecided,

    /// Underlying store failure.
    #[error("bid store error: {0}")]
    Store(String),
}
