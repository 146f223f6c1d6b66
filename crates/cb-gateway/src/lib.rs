//! # HTTP Gateway
//!
//! The external HTTP surface of the marketplace core:
//!
//! - `POST /v1/webhooks/payments` - the signed payment webhook
//! - `POST /v1/bids` - bid submission
//! - `POST /v1/bids/:bid_id/decision` - owner accept/reject
//! - `GET  /v1/projects/:project_id/bids` - bids on a project
//! - `GET  /v1/accounts/:account_id/balance` - ledger read
//! - `GET  /v1/accounts/:account_id/entitlements` - live grants
//! - `POST /v1/checkout/sessions` - start a purchase flow
//! - `GET  /health` - liveness
//!
//! The webhook contract: `400` only for authenticity failures, `500` only
//! for store failures (so the provider retries), and `200 {"received":
//! true}` for everything else, including no-ops. Replaying a delivery is
//! always safe.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod service;

pub use config::{ConfigError, GatewayConfig, WebhookConfig, DEFAULT_WEBHOOK_SECRET};
pub use error::{ApiError, GatewayError};
pub use router::{build_router, AppState};
pub use service::GatewayService;
