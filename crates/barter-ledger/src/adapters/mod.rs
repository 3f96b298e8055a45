//! # Adapters
//!
//! Port implementations shipped with the core: the in-memory state store and
//! the JSON record codec.

pub mod codec;
pub mod memory_store;

pub use codec::{decode_record, encode_record};
pub use memory_store::InMemoryStateStore;
