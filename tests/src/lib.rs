//! # CareBid Test Suite
//!
//! Unified test crate for cross-subsystem behavior.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs     # Ledger, bidding, and reconciler working together
//!     └── gateway.rs   # HTTP-level contracts through the axum router
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p carebid-tests
//! cargo test -p carebid-tests integration::flows::
//! ```

#![allow(dead_code)]

pub mod integration;
