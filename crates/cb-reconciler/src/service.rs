//! The reconciler itself: one event in, at most one state change out.

use crate::domain::errors::ReconcileError;
use crate::domain::events::{PaymentEvent, Purchase};
use crate::domain::plans::TokenPlanCatalog;
use crate::ports::ListingPromoter;
use cb_entitlements::{ActivationOutcome, EntitlementService};
use cb_ledger::{GrantAuditLog, GrantAuditRecord, LedgerStore};
use chrono::Utc;
use shared_types::{AccountId, PaymentId};
use std::sync::Arc;
use tracing::{info, warn};

/// How a delivery was absorbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// State changed as a result of this delivery.
    Applied,
    /// A previous delivery already changed it; this one wrote nothing.
    AlreadyApplied,
    /// The event is not addressed to this system; acknowledged untouched.
    Ignored,
}

/// Applies payment-completion events to the ledger and entitlement stores.
pub struct Reconciler {
    ledger: Arc<dyn LedgerStore>,
    audit: Arc<dyn GrantAuditLog>,
    entitlements: EntitlementService,
    promoter: Arc<dyn ListingPromoter>,
    plans: Arc<TokenPlanCatalog>,
}

impl Reconciler {
    pub fn new(
        ledger: Arc<dyn LedgerStore>,
        audit: Arc<dyn GrantAuditLog>,
        entitlements: EntitlementService,
        promoter: Arc<dyn ListingPromoter>,
        plans: Arc<TokenPlanCatalog>,
    ) -> Self {
        Self {
            ledger,
            audit,
            entitlements,
            promoter,
            plans,
        }
    }

    /// Applies one verified event.
    ///
    /// Safe to call any number of times with the same event: replays come
    /// back as [`Disposition::AlreadyApplied`]. An `Err` means nothing
    /// durable happened and the delivery should be retried.
    pub fn apply(&self, event: &PaymentEvent) -> Result<Disposition, ReconcileError> {
        let Some(purchase) = event.purchase() else {
            warn!(
                payment = %event.payment_id,
                "payment event with unusable metadata, acknowledging as no-op"
            );
            return Ok(Disposition::Ignored);
        };

        match purchase {
            Purchase::Tokens { account_id, plan } => {
                self.apply_tokens(&event.payment_id, &account_id, &plan)
            }
            Purchase::BuyerPro { account_id } => self.apply_buyer_pro(&account_id),
            Purchase::SellerPlus { account_id } => self.apply_seller_plus(&account_id),
        }
    }

    fn apply_tokens(
        &self,
        payment_id: &PaymentId,
        account_id: &AccountId,
        plan_name: &str,
    ) -> Result<Disposition, ReconcileError> {
        let Some(plan) = self.plans.resolve(plan_name) else {
            warn!(
                payment = %payment_id,
                plan = plan_name,
                "token grant names an unknown plan, acknowledging as no-op"
            );
            return Ok(Disposition::Ignored);
        };

        // The audit record claims the payment id; a replay finds the claim
        // and stops before touching the balance.
        let record = GrantAuditRecord {
            payment_id: payment_id.clone(),
            account_id: account_id.clone(),
            plan: plan.name.clone(),
            tokens: plan.tokens,
            recorded_at: Utc::now(),
        };
        if !self.audit.record_if_absent(record)? {
            return Ok(Disposition::AlreadyApplied);
        }

        let balance = self.ledger.credit(account_id, plan.tokens)?;
        info!(
            payment = %payment_id,
            account = %account_id,
            tokens = plan.tokens,
            balance,
            "token grant applied"
        );
        Ok(Disposition::Applied)
    }

    fn apply_buyer_pro(&self, account_id: &AccountId) -> Result<Disposition, ReconcileError> {
        match self.entitlements.activate_buyer_pro(account_id, Utc::now())? {
            ActivationOutcome::Activated => Ok(Disposition::Applied),
            ActivationOutcome::AlreadyActive => Ok(Disposition::AlreadyApplied),
        }
    }

    fn apply_seller_plus(&self, account_id: &AccountId) -> Result<Disposition, ReconcileError> {
        let outcome = self
            .entitlements
            .activate_seller_plus(account_id, Utc::now())?;

        // Promotion is best-effort: the payment is acknowledged whether or
        // not the listings could be flagged.
        if let Err(err) = self.promoter.feature_listings(account_id) {
            warn!(
                account = %account_id,
                error = %err,
                "listing promotion failed after seller_plus activation"
            );
        }

        match outcome {
            ActivationOutcome::Activated => Ok(Disposition::Applied),
            ActivationOutcome::AlreadyActive => Ok(Disposition::AlreadyApplied),
        }
    }
}
