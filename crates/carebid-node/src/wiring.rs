//! Adapter wiring, in dependency order: stores first, then the services
//! that orchestrate them, then the gateway state.

use crate::adapters::CatalogListingPromoter;
use crate::config::NodeConfig;
use cb_bidding::{
    BidService, InMemoryBidStore, InMemoryProjectCatalog, PricingTable, ProjectListing,
};
use cb_entitlements::{EntitlementService, InMemoryEntitlementStore};
use cb_gateway::{AppState, GatewayError, GatewayService};
use cb_ledger::{InMemoryGrantAuditLog, InMemoryLedger, LedgerStore};
use cb_reconciler::{HostedCheckoutProvider, Reconciler, TokenPlanCatalog};
use shared_types::{AccountId, Money, ProjectId};
use std::sync::Arc;
use tracing::info;

pub fn build_gateway(config: &NodeConfig) -> Result<GatewayService, GatewayError> {
    let ledger = Arc::new(InMemoryLedger::new());
    let audit = Arc::new(InMemoryGrantAuditLog::new());
    let bid_store = Arc::new(InMemoryBidStore::new());
    let catalog = Arc::new(InMemoryProjectCatalog::new());
    let entitlement_store = Arc::new(InMemoryEntitlementStore::new());
    let plans = Arc::new(TokenPlanCatalog::default());

    if config.seed_demo_data {
        seed_demo_data(ledger.as_ref(), &catalog)?;
    }

    let entitlements = EntitlementService::new(entitlement_store);
    let bids = Arc::new(BidService::new(
        bid_store,
        catalog.clone(),
        ledger.clone(),
        PricingTable::default(),
    ));
    let reconciler = Arc::new(Reconciler::new(
        ledger.clone(),
        audit,
        entitlements.clone(),
        Arc::new(CatalogListingPromoter::new(catalog)),
        plans.clone(),
    ));
    let checkout = Arc::new(HostedCheckoutProvider::new(
        config.gateway.checkout.base_url.clone(),
        plans,
    ));

    let state = AppState {
        bids,
        reconciler,
        checkout,
        ledger,
        entitlements,
        webhook: config.gateway.webhook.clone(),
    };
    GatewayService::new(config.gateway.clone(), state)
}

/// A small catalog and one funded seller, enough to click through the API
/// locally.
fn seed_demo_data(
    ledger: &dyn LedgerStore,
    catalog: &InMemoryProjectCatalog,
) -> Result<(), GatewayError> {
    let projects = [
        ("proj-ehr-migration", "acct_demo_clinic", 12_000u64),
        ("proj-telehealth-intake", "acct_demo_clinic", 3_500),
        ("proj-billing-audit", "acct_demo_hospital", 800),
    ];
    for (id, owner, budget) in projects {
        catalog
            .upsert(ProjectListing {
                id: ProjectId::new(id),
                owner_id: AccountId::new(owner),
                title: id.replace('-', " "),
                budget: Money::from_dollars(budget),
                featured: false,
                open: true,
            })
            .map_err(|e| GatewayError::Internal(e.to_string()))?;
    }

    ledger
        .credit(&AccountId::new("acct_demo_seller"), 25)
        .map_err(|e| GatewayError::Internal(e.to_string()))?;

    info!("seeded demo catalog and balances");
    Ok(())
}
