//! # Barter Ledger
//!
//! A ledger-resident registry of uniquely keyed, owned invoices plus an order
//! book in which traders offer to swap invoices with given attributes for
//! invoices with other attributes. All state lives in a byte-level key-value
//! store behind the [`StateStore`] port.
//!
//! ## Architecture
//!
//! ```text
//! host ──(function, args)──→ LedgerDispatcher ──→ BarterLedgerService
//!                                                  │  registry / transfer
//!                                                  │  order book / matcher
//!                                                  │  janitor
//!                                                  ↓
//!                                             StateStore (get / put / put_batch)
//! ```
//!
//! ## State Records
//!
//! | Key | Record | Encoding |
//! |-----|--------|----------|
//! | `<invoice_number>` | [`Invoice`] | JSON object |
//! | `_invoiceindex` | [`InvoiceIndex`] | JSON array of keys |
//! | `_opentrades` | [`OrderBook`] | JSON object |
//!
//! ## Ledger Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Unique identity | A second create with the same key fails `AlreadyExists` |
//! | Index completeness | Every created key is listed exactly once, in creation order |
//! | Owner-only mutation | Transfers rewrite the owner field and nothing else |
//! | Satisfiable book | After a janitor pass every willing option is held by its requester |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Records, attribute matching, outcomes, errors
//! - `ports/` - Inbound API and outbound state store / clock
//! - `adapters/` - JSON record codec and in-memory store
//! - `service/` - Application service implementing the API
//! - `dispatch/` - Positional string interface
//!
//! ## Usage
//!
//! ```ignore
//! use barter_ledger::{BarterLedgerService, InMemoryStateStore, LedgerConfig, LedgerDispatcher};
//!
//! let service = BarterLedgerService::new(Arc::new(InMemoryStateStore::new()), LedgerConfig::default());
//! service.initialize()?;
//! let dispatcher = LedgerDispatcher::new(Arc::new(service));
//!
//! dispatcher.invoke("open_trade", &["bob", "red", "16", "blue", "16"])?;
//! ```

pub mod adapters;
pub mod dispatch;
pub mod domain;
pub mod ports;
pub mod service;
pub mod test_utils;

// Re-export key types for convenience
pub use adapters::{decode_record, encode_record, InMemoryStateStore};
pub use dispatch::{error_response, Command, LedgerDispatcher, LedgerFunction};
pub use domain::errors::{ErrorKind, LedgerError, LedgerErrorPayload, StoreError};
pub use domain::{
    find_match, prune_unsatisfiable, Attributes, CleanReport, Invoice, InvoiceIndex, LedgerConfig,
    LedgerKeys, OpenTrade, OrderBook, RemoveOutcome, TradeId, TradeOutcome, TradeRequest,
    TradeWant, DEFAULT_INVOICE_INDEX_KEY, DEFAULT_OPEN_TRADES_KEY,
};
pub use ports::{BarterLedgerApi, StateStore, StateWrite, SystemTimeSource, TimeSource};
pub use service::BarterLedgerService;
