//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the ledger core requires the host to provide.
//!
//! Production: `RocksDbStateStore` (ledger-node/adapters/storage/rocksdb_adapter.rs)
//! Testing: `InMemoryStateStore` (adapters/memory_store.rs)

use crate::domain::{StoreError, Timestamp};

/// Byte-level state store gateway.
///
/// Deliberately minimal: no scans, no range queries, no cross-key
/// transactions beyond the optional [`StateStore::put_batch`].
pub trait StateStore: Send + Sync {
    /// Get a value by key. `Ok(None)` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Put a single key-value pair.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Write several keys, in order.
    ///
    /// The default applies the writes one by one and stops at the first
    /// failure, leaving earlier writes in place. Backends with native batch
    /// support override this so that either all writes land or none do.
    fn put_batch(&self, writes: Vec<StateWrite>) -> Result<(), StoreError> {
        for write in writes {
            self.put(&write.key, &write.value)?;
        }
        Ok(())
    }
}

/// One pending write of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateWrite {
    pub key: String,
    pub value: Vec<u8>,
}

impl StateWrite {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Wall-clock source used to mint trade identities.
pub trait TimeSource: Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_millis(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| Timestamp::try_from(d.as_millis()).unwrap_or(Timestamp::MAX))
            .unwrap_or(0)
    }
}
