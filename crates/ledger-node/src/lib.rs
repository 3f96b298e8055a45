//! # Ledger Node Library
//!
//! Host-side pieces of the barter ledger, exposed for the binary and for
//! integration tests.
//!
//! ## Modular Structure
//!
//! - `container/` - Configuration and the [`LedgerNode`] wiring
//! - `adapters/` - State store backends (in-memory, RocksDB)

pub mod adapters;
pub mod container;

pub use adapters::NodeStore;
pub use container::{ConfigError, LedgerNode, NodeConfig, NodeError, ScriptSummary, StorageConfig};
