//! # Barter Ledger Test Suite
//!
//! Unified test crate for behaviour that spans modules or crates.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs              # Registry + book + matcher through the service API
//!     ├── dispatch_flows.rs     # The same flows through positional invocations
//!     ├── janitor_properties.rs # Randomized janitor / matcher properties
//!     └── concurrency.rs        # Single-writer discipline under threads
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p barter-tests
//! cargo test -p barter-tests integration::janitor_properties
//! ```

#![allow(dead_code)]

pub mod integration;
