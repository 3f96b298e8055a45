//! # RocksDB State Store
//!
//! Persistent implementation of the ledger's [`StateStore`] port.
//!
//! - Single default column family, keys stored as UTF-8 bytes
//! - Batches committed through one `WriteBatch`
//! - Snappy compression
//! - Optional fsync on every write

use barter_ledger::{StateStore, StateWrite, StoreError};
use rocksdb::{DBCompressionType, Options, WriteBatch, WriteOptions, DB};
use std::path::{Path, PathBuf};
use tracing::info;

/// RocksDB configuration.
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory.
    pub path: PathBuf,
    /// Write buffer size in bytes (default: 16MB).
    pub write_buffer_size: usize,
    /// Enable fsync after each write (default: true for durability).
    pub sync_writes: bool,
}

impl RocksDbConfig {
    pub fn new(path: impl Into<PathBuf>, sync_writes: bool) -> Self {
        Self {
            path: path.into(),
            write_buffer_size: 16 * 1024 * 1024,
            sync_writes,
        }
    }

    /// Config for testing (small buffers, no sync).
    pub fn for_testing(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_buffer_size: 1024 * 1024,
            sync_writes: false,
        }
    }
}

/// RocksDB-backed ledger state.
pub struct RocksDbStateStore {
    db: DB,
    config: RocksDbConfig,
}

impl RocksDbStateStore {
    /// Open or create the database.
    pub fn open(config: RocksDbConfig) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(DBCompressionType::Snappy);

        let db = DB::open(&opts, &config.path).map_err(|e| StoreError::Io {
            message: format!("failed to open RocksDB at {}: {e}", config.path.display()),
        })?;
        info!(path = %config.path.display(), sync_writes = config.sync_writes, "RocksDB state store opened");

        Ok(Self { db, config })
    }

    fn write_options(&self) -> WriteOptions {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        write_opts
    }
}

impl StateStore for RocksDbStateStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.db.get(key.as_bytes()).map_err(|e| StoreError::Io {
            message: format!("RocksDB get failed: {e}"),
        })
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.db
            .put_opt(key.as_bytes(), value, &self.write_options())
            .map_err(|e| StoreError::Io {
                message: format!("RocksDB put failed: {e}"),
            })
    }

    fn put_batch(&self, writes: Vec<StateWrite>) -> Result<(), StoreError> {
        let mut batch = WriteBatch::default();
        for write in &writes {
            batch.put(write.key.as_bytes(), &write.value);
        }
        self.db
            .write_opt(batch, &self.write_options())
            .map_err(|e| StoreError::Io {
                message: format!("RocksDB batch write failed: {e}"),
            })
    }
}
