//! # Node Adapters
//!
//! Outbound port implementations provided by the host.

pub mod storage;

pub use storage::NodeStore;
