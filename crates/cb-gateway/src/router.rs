use crate::config::{CorsConfig, GatewayConfig, WebhookConfig};
use crate::handlers;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use cb_bidding::BidService;
use cb_entitlements::EntitlementService;
use cb_ledger::LedgerStore;
use cb_reconciler::{CheckoutProvider, Reconciler};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub bids: Arc<BidService>,
    pub reconciler: Arc<Reconciler>,
    pub checkout: Arc<dyn CheckoutProvider>,
    pub ledger: Arc<dyn LedgerStore>,
    pub entitlements: EntitlementService,
    pub webhook: WebhookConfig,
}

/// Builds the gateway router with its middleware stack.
pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health))
        .route("/v1/bids", post(handlers::submit_bid))
        .route("/v1/bids/:bid_id/decision", post(handlers::decide_bid))
        .route("/v1/projects/:project_id/bids", get(handlers::project_bids))
        .route(
            "/v1/accounts/:account_id/balance",
            get(handlers::account_balance),
        )
        .route(
            "/v1/accounts/:account_id/entitlements",
            get(handlers::account_entitlements),
        )
        .route(
            "/v1/checkout/sessions",
            post(handlers::create_checkout_session),
        )
        .route("/v1/webhooks/payments", post(handlers::payment_webhook))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.timeouts.request_secs,
        )))
        .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes));

    let router = if config.cors.enabled {
        router.layer(create_cors_layer(&config.cors))
    } else {
        router
    };

    router.with_state(state)
}

fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
