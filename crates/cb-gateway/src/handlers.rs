//! Request handlers.

use crate::error::ApiError;
use crate::router::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use cb_bidding::{Bid, BidDecision, BidReceipt, SubmitBidRequest};
use cb_entitlements::Entitlement;
use cb_reconciler::{CheckoutRequest, CheckoutSession, PaymentEvent};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared_types::{webhook, AccountId, BidId, ProjectId};
use tracing::{error, warn};

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub async fn submit_bid(
    State(state): State<AppState>,
    Json(request): Json<SubmitBidRequest>,
) -> Result<(StatusCode, Json<BidReceipt>), ApiError> {
    let receipt = state.bids.submit(request)?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub decider_id: AccountId,
    pub decision: BidDecision,
}

pub async fn decide_bid(
    State(state): State<AppState>,
    Path(bid_id): Path<BidId>,
    Json(request): Json<DecisionRequest>,
) -> Result<Json<Bid>, ApiError> {
    let bid = state
        .bids
        .decide(&request.decider_id, &bid_id, request.decision)?;
    Ok(Json(bid))
}

pub async fn project_bids(
    State(state): State<AppState>,
    Path(project_id): Path<ProjectId>,
) -> Result<Json<Vec<Bid>>, ApiError> {
    Ok(Json(state.bids.bids_for_project(&project_id)?))
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub account_id: AccountId,
    pub balance: u64,
}

pub async fn account_balance(
    State(state): State<AppState>,
    Path(account_id): Path<AccountId>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = state.ledger.balance(&account_id)?;
    Ok(Json(BalanceResponse {
        account_id,
        balance,
    }))
}

pub async fn account_entitlements(
    State(state): State<AppState>,
    Path(account_id): Path<AccountId>,
) -> Result<Json<Vec<Entitlement>>, ApiError> {
    let grants = state
        .entitlements
        .live_entitlements(&account_id, Utc::now())?;
    Ok(Json(grants))
}

pub async fn create_checkout_session(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutSession>), ApiError> {
    let session = state.checkout.create_session(&request)?;
    Ok((StatusCode::CREATED, Json(session)))
}

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// The payment webhook.
///
/// Verification runs against the raw bytes before anything is parsed; a
/// bad signature is the only 400 here. Once verified, a payload we cannot
/// use is acknowledged as a no-op so the provider stops retrying, and only
/// a store failure earns a 500 (which makes the provider redeliver).
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, ApiError> {
    let header = headers
        .get(webhook::SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(ApiError::invalid_signature)?;

    webhook::verify_signature(
        state.webhook.secret.as_bytes(),
        header,
        &body,
        webhook::current_timestamp(),
        state.webhook.tolerance_secs,
    )
    .map_err(|err| {
        warn!(error = %err, "rejected webhook delivery");
        ApiError::invalid_signature()
    })?;

    let event: PaymentEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(err) => {
            warn!(error = %err, "verified webhook payload did not parse, acknowledging as no-op");
            return Ok(Json(WebhookAck { received: true }));
        }
    };

    match state.reconciler.apply(&event) {
        Ok(_) => Ok(Json(WebhookAck { received: true })),
        Err(err) => {
            error!(payment = %event.payment_id, error = %err, "reconciliation failed");
            Err(ApiError::internal("reconciliation failed"))
        }
    }
}
