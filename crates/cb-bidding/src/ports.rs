use crate::domain::entities::{Bid, BidStatus, ProjectListing};
use crate::domain::errors::BidError;
use shared_types::{AccountId, BidId, ProjectId};

/// Durable bid records carrying the `(project, seller)` uniqueness
/// constraint.
///
/// `insert_unique` is where the constraint lives. The workflow's
/// read-before-insert duplicate check is advisory only: two tabs
/// submitting the same pair concurrently both pass it, and exactly one of
/// them must lose here.
pub trait BidStore: Send + Sync {
    /// Atomic check-and-insert. Fails with [`BidError::DuplicateBid`] when
    /// a bid for the pair already exists, leaving the store untouched.
    fn insert_unique(&self, bid: Bid) -> Result<(), BidError>;

    /// The bid for a `(project, seller)` pair, if any.
    fn get(&self, project: &ProjectId, seller: &AccountId) -> Result<Option<Bid>, BidError>;

    /// Lookup by bid id.
    fn get_by_id(&self, id: &BidId) -> Result<Option<Bid>, BidError>;

    /// Overwrites the bid's status.
    fn update_status(&self, id: &BidId, status: BidStatus) -> Result<(), BidError>;

    /// All bids on a project, oldest first.
    fn bids_for_project(&self, project: &ProjectId) -> Result<Vec<Bid>, BidError>;
}

/// Read model of the project catalog.
pub trait ProjectCatalog: Send + Sync {
    fn get(&self, project: &ProjectId) -> Result<Option<ProjectListing>, BidError>;
}
