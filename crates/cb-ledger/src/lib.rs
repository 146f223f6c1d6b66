//! # Bid-Token Ledger
//!
//! Per-account balances of spendable bid tokens, plus the grant audit log
//! that makes payment-driven top-ups idempotent.
//!
//! The balance is one of only two shared mutable resources in the
//! marketplace (the other is the bid uniqueness pair), so the debit is
//! expressed as a single conditional store operation rather than a
//! read-modify-write pair. See [`ports::LedgerStore::try_debit`].

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::memory::{InMemoryGrantAuditLog, InMemoryLedger};
pub use domain::entities::GrantAuditRecord;
pub use domain::errors::LedgerError;
pub use ports::{GrantAuditLog, LedgerStore};
