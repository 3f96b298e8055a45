//! # Ports Layer
//!
//! - **Driving Ports (Inbound)**: the ledger API consumed by dispatch and hosts
//! - **Driven Ports (Outbound)**: state store and clock implemented by adapters

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
