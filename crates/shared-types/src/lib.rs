//! # Shared Types
//!
//! Identifier, money, and webhook-authenticity types used across the
//! CareBid subsystem crates.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod ids;
pub mod money;
pub mod webhook;

pub use ids::{AccountId, BidId, EntitlementId, PaymentId, ProjectId};
pub use money::Money;
