use crate::domain::entities::{Bid, BidStatus, ProjectListing};
use crate::domain::errors::BidError;
use crate::ports::{BidStore, ProjectCatalog};
use shared_types::{AccountId, BidId, ProjectId};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory implementation of [`BidStore`].
///
/// `insert_unique` holds the write lock across the duplicate scan and the
/// push, standing in for a database unique index on
/// `(project_id, seller_id)`.
pub struct InMemoryBidStore {
    bids: RwLock<Vec<Bid>>,
}

impl InMemoryBidStore {
    pub fn new() -> Self {
        Self {
            bids: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryBidStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BidStore for InMemoryBidStore {
    fn insert_unique(&self, bid: Bid) -> Result<(), BidError> {
        let mut bids = self
            .bids
            .write()
            .map_err(|_| BidError::Store("bid lock poisoned".to_string()))?;
        if bids
            .iter()
            .any(|b| b.project_id == bid.project_id && b.seller_id == bid.seller_id)
        {
            return Err(BidError::DuplicateBid {
                project_id: bid.project_id,
                seller_id: bid.seller_id,
            });
        }
        bids.push(bid);
        Ok(())
    }

    fn get(&self, project: &ProjectId, seller: &AccountId) -> Result<Option<Bid>, BidError> {
        let bids = self
            .bids
            .read()
            .map_err(|_| BidError::Store("bid lock poisoned".to_string()))?;
        Ok(bids
            .iter()
            .find(|b| &b.project_id == project && &b.seller_id == seller)
            .cloned())
    }

    fn get_by_id(&self, id: &BidId) -> Result<Option<Bid>, BidError> {
        let bids = self
            .bids
            .read()
            .map_err(|_| BidError::Store("bid lock poisoned".to_string()))?;
        Ok(bids.iter().find(|b| &b.id == id).cloned())
    }

    fn update_status(&self, id: &BidId, status: BidStatus) -> Result<(), BidError> {
        let mut bids = self
            .bids
            .write()
            .map_err(|_| BidError::Store("bid lock poisoned".to_string()))?;
        match bids.iter_mut().find(|b| &b.id == id) {
            Some(bid) => {
                bid.status = status;
                Ok(())
            }
            None => Err(BidError::BidNotFound(*id)),
        }
    }

    fn bids_for_project(&self, project: &ProjectId) -> Result<Vec<Bid>, BidError> {
        let bids = self
            .bids
            .read()
            .map_err(|_| BidError::Store("bid lock poisoned".to_string()))?;
        Ok(bids
            .iter()
            .filter(|b| &b.project_id == project)
            .cloned()
            .collect())
    }
}

/// In-memory implementation of [`ProjectCatalog`], with the write hooks
/// the runtime uses for seeding and listing promotion.
pub struct InMemoryProjectCatalog {
    projects: RwLock<HashMap<ProjectId, ProjectListing>>,
}

impl InMemoryProjectCatalog {
    pub fn new() -> Self {
        Self {
            projects: RwLock::new(HashMap::new()),
        }
    }

    /// Adds or replaces a listing.
    pub fn upsert(&self, listing: ProjectListing) -> Result<(), BidError> {
        let mut projects = self
            .projects
            .write()
            .map_err(|_| BidError::Store("catalog lock poisoned".to_string()))?;
        projects.insert(listing.id.clone(), listing);
        Ok(())
    }

    /// Flags every open listing owned by the account as featured.
    /// Returns how many listings changed.
    pub fn set_featured_for_owner(&self, owner: &AccountId) -> Result<u64, BidError> {
        let mut projects = self
            .projects
            .write()
            .map_err(|_| BidError::Store("catalog lock poisoned".to_string()))?;
        let mut updated = 0;
        for listing in projects.values_mut() {
            if &listing.owner_id == owner && listing.open && !listing.featured {
                listing.featured = true;
                updated += 1;
            }
        }
        Ok(updated)
    }
}

impl Default for InMemoryProjectCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectCatalog for InMemoryProjectCatalog {
    fn get(&self, project: &ProjectId) -> Result<Option<ProjectListing>, BidError> {
        let projects = self
            .projects
            .read()
            .map_err(|_| BidError::Store("catalog lock poisoned".to_string()))?;
        Ok(projects.get(project).cloned())
    }
}
