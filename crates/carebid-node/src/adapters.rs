//! Port implementations that bridge subsystem crates.

use cb_bidding::InMemoryProjectCatalog;
use cb_reconciler::{ListingPromoter, PromoteError};
use shared_types::AccountId;
use std::sync::Arc;
use tracing::debug;

/// Promotes a seller's listings by flagging their open catalog entries as
/// featured after a `seller_plus` activation.
pub struct CatalogListingPromoter {
    catalog: Arc<InMemoryProjectCatalog>,
}

impl CatalogListingPromoter {
    pub fn new(catalog: Arc<InMemoryProjectCatalog>) -> Self {
        Self { catalog }
    }
}

impl ListingPromoter for CatalogListingPromoter {
    fn feature_listings(&self, account: &AccountId) -> Result<(), PromoteError> {
        let updated = self
            .catalog
            .set_featured_for_owner(account)
            .map_err(|e| PromoteError(e.to_string()))?;
        debug!(account = %account, listings = updated, "featured listings");
        Ok(())
    }
}
