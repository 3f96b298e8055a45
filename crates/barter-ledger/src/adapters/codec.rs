//! # Record Codec
//!
//! JSON encoding of ledger records. Field names are stable; floats use the
//! exact round-trip parser so amounts decode to the value that was stored.

use crate::domain::LedgerError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode a record stored under `key`.
pub fn encode_record<T: Serialize>(key: &str, record: &T) -> Result<Vec<u8>, LedgerError> {
    serde_json::to_vec(record).map_err(|e| LedgerError::Codec {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Decode the bytes stored under `key`.
pub fn decode_record<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<T, LedgerError> {
    serde_json::from_slice(bytes).map_err(|e| LedgerError::Codec {
        key: key.to_string(),
        message: e.to_string(),
    })
}
