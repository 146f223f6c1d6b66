//! Activation rules for premium grants.

use crate::domain::entities::{Entitlement, EntitlementKind};
use crate::domain::errors::EntitlementError;
use crate::ports::EntitlementStore;
use chrono::{DateTime, Utc};
use shared_types::AccountId;
use std::sync::Arc;
use tracing::info;

/// Outcome of an activation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// A new entitlement row was created.
    Activated,
    /// A live grant already covered the account; nothing was written.
    AlreadyActive,
}

/// Applies purchases of premium capabilities to the entitlement store.
#[derive(Clone)]
pub struct EntitlementService {
    store: Arc<dyn EntitlementStore>,
}

impl EntitlementService {
    pub fn new(store: Arc<dyn EntitlementStore>) -> Self {
        Self { store }
    }

    /// `buyer_pro` grants do not stack: one live row per account, ever.
    pub fn activate_buyer_pro(
        &self,
        account: &AccountId,
        now: DateTime<Utc>,
    ) -> Result<ActivationOutcome, EntitlementError> {
        if self
            .store
            .active_for(account, EntitlementKind::BuyerPro)?
            .is_some()
        {
            return Ok(ActivationOutcome::AlreadyActive);
        }

        self.store
            .insert(Entitlement::buyer_pro(account.clone(), now))?;
        info!(account = %account, "buyer_pro activated");
        Ok(ActivationOutcome::Activated)
    }

    /// `seller_plus` is time-boxed: a live unexpired grant wins; a stale
    /// `Active` row whose expiry passed is superseded, not duplicated.
    pub fn activate_seller_plus(
        &self,
        account: &AccountId,
        now: DateTime<Utc>,
    ) -> Result<ActivationOutcome, EntitlementError> {
        if let Some(existing) = self
            .store
            .active_for(account, EntitlementKind::SellerPlus)?
        {
            if existing.is_live(now) {
                return Ok(ActivationOutcome::AlreadyActive);
            }
            // The term ran out but nothing flipped the row yet.
            self.store.mark_expired(&existing.id)?;
        }

        self.store
            .insert(Entitlement::seller_plus(account.clone(), now))?;
        info!(account = %account, "seller_plus activated");
        Ok(ActivationOutcome::Activated)
    }

    /// Grants currently conferring their capability, for the account API.
    pub fn live_entitlements(
        &self,
        account: &AccountId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Entitlement>, EntitlementError> {
        Ok(self
            .store
            .all_for(account)?
            .into_iter()
            .filter(|grant| grant.is_live(now))
            .collect())
    }
}
