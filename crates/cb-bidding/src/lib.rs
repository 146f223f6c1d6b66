//! # Bidding
//!
//! Bid pricing and the bid submission workflow.
//!
//! Placing a bid spends tokens from the seller's ledger balance, priced off
//! the project's budget. The two invariants the workflow defends:
//!
//! 1. at most one bid per `(project, seller)` pair, enforced by the store's
//!    uniqueness constraint, not by application prechecks;
//! 2. the balance is debited by exactly the cost computed for the budget,
//!    through one atomic conditional decrement that can never overdraw.
//!
//! Effect ordering is debit-first: the conditional debit lands, then the
//! bid row. If the insert loses a same-pair race the debit is compensated
//! with a credit. Bids are never deleted, so the reverse order would have
//! no clean compensation for an insert that succeeded.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::memory::{InMemoryBidStore, InMemoryProjectCatalog};
pub use domain::entities::{
    Bid, BidDecision, BidReceipt, BidStatus, ProjectListing, SubmitBidRequest,
    MIN_BID_MESSAGE_LEN,
};
pub use domain::errors::BidError;
pub use domain::pricing::{PriceTier, PricingError, PricingTable};
pub use ports::{BidStore, ProjectCatalog};
pub use service::BidService;
