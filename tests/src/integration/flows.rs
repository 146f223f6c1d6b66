//! # Integration Test Flows
//!
//! Tests that the ledger, bidding workflow, entitlements, and reconciler
//! hold their joint invariants when wired together the way the runtime
//! wires them:
//!
//! 1. **Top-up → bid**: a payment-driven grant funds a submission, and the
//!    balance moves by exactly the priced cost.
//! 2. **Uniqueness under racing submissions**: concurrent same-pair
//!    submissions produce exactly one bid and one debit.
//! 3. **Replay safety**: every payment event type is idempotent.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};

    use cb_bidding::{
        BidService, BidStore, InMemoryBidStore, InMemoryProjectCatalog, PricingTable,
        ProjectListing, SubmitBidRequest, MIN_BID_MESSAGE_LEN,
    };
    use cb_entitlements::{EntitlementService, EntitlementStore, InMemoryEntitlementStore};
    use cb_ledger::{GrantAuditLog, InMemoryGrantAuditLog, InMemoryLedger, LedgerStore};
    use cb_reconciler::{
        Disposition, EventMetadata, ListingPromoter, PaymentEvent, PromoteError, Reconciler,
        TokenPlanCatalog,
    };
    use shared_types::{AccountId, Money, PaymentId, ProjectId};

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    struct NoopPromoter;

    impl ListingPromoter for NoopPromoter {
        fn feature_listings(&self, _account: &AccountId) -> Result<(), PromoteError> {
            Ok(())
        }
    }

    struct Marketplace {
        ledger: Arc<InMemoryLedger>,
        audit: Arc<InMemoryGrantAuditLog>,
        bid_store: Arc<InMemoryBidStore>,
        entitlement_store: Arc<InMemoryEntitlementStore>,
        bids: Arc<BidService>,
        reconciler: Reconciler,
    }

    /// One open project (`proj-1`, $600 budget, 2 tokens per bid under the
    /// default pricing table), no funded accounts.
    fn marketplace() -> Marketplace {
        let ledger = Arc::new(InMemoryLedger::new());
        let audit = Arc::new(InMemoryGrantAuditLog::new());
        let bid_store = Arc::new(InMemoryBidStore::new());
        let entitlement_store = Arc::new(InMemoryEntitlementStore::new());
        let catalog = Arc::new(InMemoryProjectCatalog::new());
        catalog
            .upsert(ProjectListing {
                id: ProjectId::new("proj-1"),
                owner_id: AccountId::new("acct_owner"),
                title: "Discharge follow-up call service".to_string(),
                budget: Money::from_dollars(600),
                featured: false,
                open: true,
            })
            .unwrap();

        let bids = Arc::new(BidService::new(
            bid_store.clone(),
            catalog,
            ledger.clone(),
            PricingTable::default(),
        ));
        let reconciler = Reconciler::new(
            ledger.clone(),
            audit.clone(),
            EntitlementService::new(entitlement_store.clone()),
            Arc::new(NoopPromoter),
            Arc::new(TokenPlanCatalog::default()),
        );

        Marketplace {
            ledger,
            audit,
            bid_store,
            entitlement_store,
            bids,
            reconciler,
        }
    }

    fn tokens_event(payment: &str, account: &str, plan: &str) -> PaymentEvent {
        PaymentEvent {
            payment_id: PaymentId::new(payment),
            amount_cents: Some(999),
            metadata: EventMetadata {
                purchase_type: Some("tokens".to_string()),
                account_id: Some(AccountId::new(account)),
                plan: Some(plan.to_string()),
            },
        }
    }

    fn entitlement_event(payment: &str, account: &str, kind: &str) -> PaymentEvent {
        PaymentEvent {
            payment_id: PaymentId::new(payment),
            amount_cents: None,
            metadata: EventMetadata {
                purchase_type: Some(kind.to_string()),
                account_id: Some(AccountId::new(account)),
                plan: None,
            },
        }
    }

    fn bid_request(seller: &str) -> SubmitBidRequest {
        SubmitBidRequest {
            project_id: ProjectId::new("proj-1"),
            seller_id: AccountId::new(seller),
            amount: Money::from_dollars(550),
            message: "x".repeat(MIN_BID_MESSAGE_LEN),
            delivery_estimate_days: 14,
        }
    }

    // =========================================================================
    // FLOW: TOP-UP THEN BID
    // =========================================================================

    #[test]
    fn test_topup_then_bid_moves_balance_by_exact_cost() {
        let mk = marketplace();
        let seller = AccountId::new("acct_seller");

        // Payment-driven top-up: starter plan grants 50 tokens.
        let disposition = mk
            .reconciler
            .apply(&tokens_event("pay_1", "acct_seller", "starter"))
            .unwrap();
        assert_eq!(disposition, Disposition::Applied);
        assert_eq!(mk.ledger.balance(&seller).unwrap(), 50);

        // Bidding on the $600 project costs 2 tokens.
        let receipt = mk.bids.submit(bid_request("acct_seller")).unwrap();
        assert_eq!(receipt.tokens_spent, 2);
        assert_eq!(mk.ledger.balance(&seller).unwrap(), 48);

        // The persisted bid records what was charged.
        let bid = mk
            .bid_store
            .get(&ProjectId::new("proj-1"), &seller)
            .unwrap()
            .expect("bid persisted");
        assert_eq!(bid.tokens_spent, 2);
    }

    #[test]
    fn test_insufficient_balance_creates_nothing() {
        let mk = marketplace();
        let seller = AccountId::new("acct_poor");
        mk.ledger.credit(&seller, 1).unwrap();

        assert!(mk.bids.submit(bid_request("acct_poor")).is_err());
        assert_eq!(mk.ledger.balance(&seller).unwrap(), 1);
        assert!(mk
            .bid_store
            .get(&ProjectId::new("proj-1"), &seller)
            .unwrap()
            .is_none());
    }

    // =========================================================================
    // FLOW: RACING SUBMISSIONS ON THE SAME PAIR
    // =========================================================================

    #[test]
    fn test_concurrent_same_pair_submissions_yield_one_bid_one_debit() {
        let mk = marketplace();
        let seller = AccountId::new("acct_racer");
        mk.ledger.credit(&seller, 10).unwrap();

        let threads = 8;
        let barrier = Arc::new(Barrier::new(threads));
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let bids = Arc::clone(&mk.bids);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    bids.submit(bid_request("acct_racer")).is_ok()
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1, "exactly one submission may win");
        assert_eq!(
            mk.bid_store
                .bids_for_project(&ProjectId::new("proj-1"))
                .unwrap()
                .len(),
            1
        );
        // Losers were refunded (or never debited): one 2-token debit total.
        assert_eq!(mk.ledger.balance(&seller).unwrap(), 8);
    }

    // =========================================================================
    // FLOW: PAYMENT EVENT REPLAYS
    // =========================================================================

    #[test]
    fn test_starter_grant_on_balance_10_yields_60_and_one_audit_record() {
        let mk = marketplace();
        let seller = AccountId::new("acct_seller");
        mk.ledger.credit(&seller, 10).unwrap();

        mk.reconciler
            .apply(&tokens_event("pay_1", "acct_seller", "starter"))
            .unwrap();

        assert_eq!(mk.ledger.balance(&seller).unwrap(), 60);
        assert_eq!(mk.audit.records_for(&seller).unwrap().len(), 1);
    }

    #[test]
    fn test_replaying_each_event_type_twice_equals_once() {
        let mk = marketplace();

        let events = [
            tokens_event("pay_t", "acct_a", "practice"),
            entitlement_event("pay_b", "acct_b", "buyer_pro"),
            entitlement_event("pay_s", "acct_c", "seller_plus"),
        ];

        for event in &events {
            assert_eq!(mk.reconciler.apply(event).unwrap(), Disposition::Applied);
        }
        for event in &events {
            assert_eq!(
                mk.reconciler.apply(event).unwrap(),
                Disposition::AlreadyApplied,
                "replay of {} must be a no-op",
                event.payment_id
            );
        }

        assert_eq!(mk.ledger.balance(&AccountId::new("acct_a")).unwrap(), 150);
        assert_eq!(
            mk.audit
                .records_for(&AccountId::new("acct_a"))
                .unwrap()
                .len(),
            1
        );
        assert_eq!(mk.entitlement_store.row_count(), 2);
    }

    #[test]
    fn test_buyer_pro_second_event_creates_zero_rows() {
        let mk = marketplace();
        let first = entitlement_event("pay_1", "acct_b", "buyer_pro");
        let second = entitlement_event("pay_2", "acct_b", "buyer_pro");

        mk.reconciler.apply(&first).unwrap();
        assert_eq!(mk.entitlement_store.row_count(), 1);

        // Different payment, same account: still no stacking.
        assert_eq!(
            mk.reconciler.apply(&second).unwrap(),
            Disposition::AlreadyApplied
        );
        assert_eq!(mk.entitlement_store.row_count(), 1);
    }

    #[test]
    fn test_seller_plus_with_live_grant_writes_nothing() {
        let mk = marketplace();

        mk.reconciler
            .apply(&entitlement_event("pay_1", "acct_s", "seller_plus"))
            .unwrap();
        let rows_before = mk
            .entitlement_store
            .all_for(&AccountId::new("acct_s"))
            .unwrap();

        mk.reconciler
            .apply(&entitlement_event("pay_2", "acct_s", "seller_plus"))
            .unwrap();
        let rows_after = mk
            .entitlement_store
            .all_for(&AccountId::new("acct_s"))
            .unwrap();

        assert_eq!(rows_before, rows_after);
    }
}
