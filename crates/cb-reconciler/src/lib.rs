//! # Payment Event Reconciler
//!
//! Translates completed-checkout notifications from the payment provider
//! into exactly one durable state change each, safely under at-least-once
//! delivery.
//!
//! Three purchase types exist: `tokens` (credit the seller's bid-token
//! balance), `buyer_pro`, and `seller_plus` (activate entitlements). Each
//! handler is idempotent; the webhook endpoint may therefore acknowledge a
//! delivery without knowing whether it is the first one.
//!
//! The reconciler's return value preserves the distinction that matters
//! for retries: [`service::Disposition`] says whether state changed, was
//! already correct, or the event simply was not ours.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::hosted_checkout::HostedCheckoutProvider;
pub use domain::errors::{CheckoutError, ReconcileError};
pub use domain::events::{EventMetadata, PaymentEvent, Purchase};
pub use domain::plans::{TokenPlan, TokenPlanCatalog, BUYER_PRO_PRICE, SELLER_PLUS_PRICE};
pub use ports::{CheckoutProvider, CheckoutRequest, CheckoutSession, ListingPromoter, PromoteError};
pub use service::{Disposition, Reconciler};
