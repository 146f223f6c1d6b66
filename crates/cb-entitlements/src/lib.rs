//! # Premium Entitlements
//!
//! Durable grants of premium capabilities: `buyer_pro` for buyers and the
//! time-boxed `seller_plus` for sellers.
//!
//! The one invariant everything here defends: at most one `Active` row per
//! `(account, kind)` pair. A purchase while a live grant exists is a no-op;
//! a purchase after a `seller_plus` grant lapsed supersedes the stale row
//! instead of stacking a second one.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::memory::InMemoryEntitlementStore;
pub use domain::entities::{
    Entitlement, EntitlementKind, EntitlementStatus, SELLER_PLUS_TERM_DAYS,
};
pub use domain::errors::EntitlementError;
pub use ports::EntitlementStore;
pub use service::{ActivationOutcome, EntitlementService};
