//! # Gateway Contract Tests
//!
//! Exercises the HTTP surface through the axum router: webhook signature
//! enforcement, the `{"received": true}` acknowledgment contract, and the
//! status mapping of the bidding API.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    use cb_bidding::{
        BidService, InMemoryBidStore, InMemoryProjectCatalog, PricingTable, ProjectListing,
        MIN_BID_MESSAGE_LEN,
    };
    use cb_entitlements::{EntitlementService, InMemoryEntitlementStore};
    use cb_gateway::{build_router, AppState, GatewayConfig};
    use cb_ledger::{InMemoryGrantAuditLog, InMemoryLedger, LedgerStore};
    use cb_reconciler::{
        HostedCheckoutProvider, ListingPromoter, PromoteError, Reconciler, TokenPlanCatalog,
    };
    use shared_types::{webhook, AccountId, Money, ProjectId};

    const SECRET: &str = "whsec_gateway_tests";

    struct NoopPromoter;

    impl ListingPromoter for NoopPromoter {
        fn feature_listings(&self, _account: &AccountId) -> Result<(), PromoteError> {
            Ok(())
        }
    }

    struct TestGateway {
        router: Router,
        ledger: Arc<InMemoryLedger>,
        entitlement_store: Arc<InMemoryEntitlementStore>,
    }

    fn gateway() -> TestGateway {
        let mut config = GatewayConfig::default();
        config.webhook.secret = SECRET.to_string();

        let ledger = Arc::new(InMemoryLedger::new());
        let audit = Arc::new(InMemoryGrantAuditLog::new());
        let bid_store = Arc::new(InMemoryBidStore::new());
        let entitlement_store = Arc::new(InMemoryEntitlementStore::new());
        let catalog = Arc::new(InMemoryProjectCatalog::new());
        let plans = Arc::new(TokenPlanCatalog::default());
        catalog
            .upsert(ProjectListing {
                id: ProjectId::new("proj-1"),
                owner_id: AccountId::new("acct_owner"),
                title: "After-hours nurse line".to_string(),
                budget: Money::from_dollars(600),
                featured: false,
                open: true,
            })
            .unwrap();

        let entitlements = EntitlementService::new(entitlement_store.clone());
        let bids = Arc::new(BidService::new(
            bid_store,
            catalog,
            ledger.clone(),
            PricingTable::default(),
        ));
        let reconciler = Arc::new(Reconciler::new(
            ledger.clone(),
            audit,
            entitlements.clone(),
            Arc::new(NoopPromoter),
            plans.clone(),
        ));
        let checkout = Arc::new(HostedCheckoutProvider::new(
            config.checkout.base_url.clone(),
            plans,
        ));

        let state = AppState {
            bids,
            reconciler,
            checkout,
            ledger: ledger.clone(),
            entitlements,
            webhook: config.webhook.clone(),
        };

        TestGateway {
            router: build_router(state, &config),
            ledger,
            entitlement_store,
        }
    }

    fn tokens_payload(payment: &str, account: &str, plan: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "payment_id": payment,
            "amount_cents": 999,
            "metadata": {"type": "tokens", "account_id": account, "plan": plan},
        }))
        .unwrap()
    }

    fn webhook_request(payload: &[u8], signature: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/webhooks/payments")
            .header(header::CONTENT_TYPE, "application/json")
            .header(webhook::SIGNATURE_HEADER, signature)
            .body(Body::from(payload.to_vec()))
            .unwrap()
    }

    fn signed_webhook_request(payload: &[u8]) -> Request<Body> {
        let signature =
            webhook::sign_payload(SECRET.as_bytes(), webhook::current_timestamp(), payload);
        webhook_request(payload, &signature)
    }

    // =========================================================================
    // WEBHOOK CONTRACT
    // =========================================================================

    #[tokio::test]
    async fn test_invalid_signature_rejected_without_state_change() {
        let gw = gateway();
        let payload = tokens_payload("pay_1", "acct_s", "starter");
        let bad_signature =
            webhook::sign_payload(b"wrong_secret", webhook::current_timestamp(), &payload);

        let response = gw
            .router
            .clone()
            .oneshot(webhook_request(&payload, &bad_signature))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            gw.ledger.balance(&AccountId::new("acct_s")).unwrap(),
            0,
            "rejected delivery must not touch the ledger"
        );
    }

    #[tokio::test]
    async fn test_missing_signature_header_rejected() {
        let gw = gateway();
        let payload = tokens_payload("pay_1", "acct_s", "starter");

        let request = Request::builder()
            .method("POST")
            .uri("/v1/webhooks/payments")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload))
            .unwrap();
        let response = gw.router.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_valid_delivery_credits_and_replay_is_safe() {
        let gw = gateway();
        let payload = tokens_payload("pay_1", "acct_s", "starter");

        let first = gw
            .router
            .clone()
            .oneshot(signed_webhook_request(&payload))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(gw.ledger.balance(&AccountId::new("acct_s")).unwrap(), 50);

        // Same event, fresh signature: the provider retrying.
        let second = gw
            .router
            .clone()
            .oneshot(signed_webhook_request(&payload))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::OK);
        assert_eq!(gw.ledger.balance(&AccountId::new("acct_s")).unwrap(), 50);
    }

    #[tokio::test]
    async fn test_verified_but_unusable_payload_acknowledged() {
        let gw = gateway();
        let payload = br#"{"payment_id":"pay_x","metadata":{"type":"gift_card"}}"#;

        let response = gw
            .router
            .clone()
            .oneshot(signed_webhook_request(payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_entitlement_event_creates_one_active_row() {
        let gw = gateway();
        let payload = serde_json::to_vec(&serde_json::json!({
            "payment_id": "pay_bp",
            "metadata": {"type": "buyer_pro", "account_id": "acct_b"},
        }))
        .unwrap();

        for _ in 0..2 {
            let response = gw
                .router
                .clone()
                .oneshot(signed_webhook_request(&payload))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
        assert_eq!(gw.entitlement_store.row_count(), 1);
    }

    // =========================================================================
    // BIDDING API
    // =========================================================================

    fn bid_body(seller: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "project_id": "proj-1",
            "seller_id": seller,
            "amount": 55_000,
            "message": "x".repeat(MIN_BID_MESSAGE_LEN),
            "delivery_estimate_days": 14,
        }))
        .unwrap()
    }

    fn bid_request(seller: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/bids")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bid_body(seller)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_submit_bid_created_then_conflict() {
        let gw = gateway();
        gw.ledger.credit(&AccountId::new("acct_s"), 10).unwrap();

        let created = gw.router.clone().oneshot(bid_request("acct_s")).await.unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        assert_eq!(gw.ledger.balance(&AccountId::new("acct_s")).unwrap(), 8);

        let duplicate = gw.router.clone().oneshot(bid_request("acct_s")).await.unwrap();
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);
        assert_eq!(gw.ledger.balance(&AccountId::new("acct_s")).unwrap(), 8);
    }

    #[tokio::test]
    async fn test_submit_bid_without_tokens_is_payment_required() {
        let gw = gateway();

        let response = gw.router.clone().oneshot(bid_request("acct_broke")).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    }

    #[tokio::test]
    async fn test_balance_endpoint_reads_ledger() {
        let gw = gateway();
        gw.ledger.credit(&AccountId::new("acct_s"), 7).unwrap();

        let request = Request::builder()
            .method("GET")
            .uri("/v1/accounts/acct_s/balance")
            .body(Body::empty())
            .unwrap();
        let response = gw.router.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_checkout_session_created() {
        let gw = gateway();
        let body = serde_json::to_vec(&serde_json::json!({
            "type": "tokens",
            "account_id": "acct_s",
            "plan": "starter",
        }))
        .unwrap();

        let request = Request::builder()
            .method("POST")
            .uri("/v1/checkout/sessions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = gw.router.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_unknown_checkout_plan_rejected() {
        let gw = gateway();
        let body = serde_json::to_vec(&serde_json::json!({
            "type": "tokens",
            "account_id": "acct_s",
            "plan": "enterprise",
        }))
        .unwrap();

        let request = Request::builder()
            .method("POST")
            .uri("/v1/checkout/sessions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = gw.router.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health() {
        let gw = gateway();
        let request = Request::builder()
            .method("GET")
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = gw.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
