//! HTTP error envelope and status mapping.
//!
//! Every failure leaves the gateway as `{"code": ..., "message": ...}`
//! with a status chosen per the error taxonomy: validation 400, missing
//! resources 404, duplicates 409, insufficiency 402 (so clients can route
//! to the top-up flow), authenticity 400, store failures 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cb_bidding::BidError;
use cb_entitlements::EntitlementError;
use cb_ledger::LedgerError;
use cb_reconciler::{CheckoutError, ReconcileError};
use serde::Serialize;

/// Machine-readable error codes returned by the API.
pub mod codes {
    pub const VALIDATION: &str = "validation_error";
    pub const NOT_FOUND: &str = "not_found";
    pub const PROJECT_CLOSED: &str = "project_closed";
    pub const DUPLICATE_BID: &str = "duplicate_bid";
    pub const INSUFFICIENT_TOKENS: &str = "insufficient_tokens";
    pub const FORBIDDEN: &str = "forbidden";
    pub const CONFLICT: &str = "conflict";
    pub const INVALID_SIGNATURE: &str = "invalid_signature";
    pub const UPSTREAM: &str = "upstream_error";
    pub const INTERNAL: &str = "internal_error";
}

/// An API error with its HTTP status.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, codes::VALIDATION, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, message)
    }

    pub fn insufficient_tokens(required: u64, available: u64) -> Self {
        let mut error = Self::new(
            StatusCode::PAYMENT_REQUIRED,
            codes::INSUFFICIENT_TOKENS,
            format!("insufficient tokens: need {required}, have {available}"),
        );
        error.details = Some(serde_json::json!({
            "required": required,
            "available": available,
        }));
        error
    }

    pub fn invalid_signature() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_SIGNATURE,
            "webhook signature verification failed",
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, codes::INTERNAL, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

impl From<BidError> for ApiError {
    fn from(err: BidError) -> Self {
        match err {
            BidError::Validation(_) => Self::validation(err.to_string()),
            BidError::ProjectNotFound(_) | BidError::BidNotFound(_) => {
                Self::not_found(err.to_string())
            }
            BidError::ProjectClosed(_) => Self::new(
                StatusCode::CONFLICT,
                codes::PROJECT_CLOSED,
                err.to_string(),
            ),
            BidError::DuplicateBid { .. } => Self::new(
                StatusCode::CONFLICT,
                codes::DUPLICATE_BID,
                err.to_string(),
            ),
            BidError::InsufficientTokens {
                required,
                available,
            } => Self::insufficient_tokens(required, available),
            BidError::NotProjectOwner => Self::new(
                StatusCode::FORBIDDEN,
                codes::FORBIDDEN,
                err.to_string(),
            ),
            BidError::AlreadyDecided => Self::new(
                StatusCode::CONFLICT,
                codes::CONFLICT,
                err.to_string(),
            ),
            BidError::Store(_) => Self::internal(err.to_string()),
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<EntitlementError> for ApiError {
    fn from(err: EntitlementError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<ReconcileError> for ApiError {
    fn from(err: ReconcileError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::UnknownPurchaseType(_)
            | CheckoutError::UnknownPlan(_)
            | CheckoutError::MissingPlan
            | CheckoutError::MissingAccount => Self::validation(err.to_string()),
            CheckoutError::Provider(_) => Self::new(
                StatusCode::BAD_GATEWAY,
                codes::UPSTREAM,
                err.to_string(),
            ),
        }
    }
}

/// Gateway lifecycle errors (not API responses).
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error.
    #[error("server bind error: {0}")]
    Bind(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}
