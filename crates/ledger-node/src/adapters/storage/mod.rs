//! # Storage Adapters
//!
//! The node picks its state store from [`StorageConfig`]: RocksDB when a data
//! directory is configured (requires the `rocksdb` feature), otherwise the
//! in-memory store from the ledger core.

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbStateStore};

use crate::container::StorageConfig;
use barter_ledger::{InMemoryStateStore, StateStore, StateWrite, StoreError};
use tracing::info;

/// State store selected at startup.
pub enum NodeStore {
    Memory(InMemoryStateStore),
    #[cfg(feature = "rocksdb")]
    RocksDb(RocksDbStateStore),
}

impl NodeStore {
    /// Open the backend named by the configuration.
    pub fn open(config: &StorageConfig) -> Result<Self, StoreError> {
        match &config.data_dir {
            #[cfg(feature = "rocksdb")]
            Some(path) => {
                let rocks = RocksDbConfig::new(path.clone(), config.sync_writes);
                Ok(Self::RocksDb(RocksDbStateStore::open(rocks)?))
            }
            #[cfg(not(feature = "rocksdb"))]
            Some(path) => Err(StoreError::Io {
                message: format!(
                    "cannot open {}: built without the rocksdb feature",
                    path.display()
                ),
            }),
            None => {
                info!("Using in-memory state store");
                Ok(Self::Memory(InMemoryStateStore::new()))
            }
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            #[cfg(feature = "rocksdb")]
            Self::RocksDb(_) => "rocksdb",
        }
    }
}

impl StateStore for NodeStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match self {
            Self::Memory(store) => store.get(key),
            #[cfg(feature = "rocksdb")]
            Self::RocksDb(store) => store.get(key),
        }
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.put(key, value),
            #[cfg(feature = "rocksdb")]
            Self::RocksDb(store) => store.put(key, value),
        }
    }

    fn put_batch(&self, writes: Vec<StateWrite>) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.put_batch(writes),
            #[cfg(feature = "rocksdb")]
            Self::RocksDb(store) => store.put_batch(writes),
        }
    }
}
