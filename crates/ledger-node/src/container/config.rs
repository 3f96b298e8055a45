//! # Node Configuration
//!
//! Ledger, storage and logging settings. Defaults are usable as-is; every
//! field can be overridden from the environment and then from CLI flags.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `BARTER_DATA_DIR` | `storage.data_dir` (RocksDB path; unset = in-memory) |
//! | `BARTER_SYNC_WRITES` | `storage.sync_writes` |
//! | `BARTER_STRICT_OUTCOMES` | `ledger.strict_outcomes` |
//! | `BARTER_AUTO_CLEAN` | `ledger.clean_after_mutation` |
//! | `BARTER_INDEX_KEY` | `ledger.keys.invoice_index` |
//! | `BARTER_BOOK_KEY` | `ledger.keys.open_trades` |
//! | `RUST_LOG` | `log_filter` |

use barter_ledger::LedgerConfig;
use std::path::PathBuf;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Ledger service configuration.
    pub ledger: LedgerConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            ledger: LedgerConfig::default(),
            storage: StorageConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// RocksDB directory. `None` selects the in-memory store.
    pub data_dir: Option<PathBuf>,
    /// fsync after each write.
    pub sync_writes: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            sync_writes: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be a boolean (true/false/1/0), got {value:?}")]
    InvalidBool { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    EmptyValue { var: &'static str },

    #[error("invoice index and order book cannot share the state key {key:?}")]
    KeyCollision { key: String },

    #[error("data directory {path:?} requested but the node was built without the rocksdb feature")]
    RocksDbUnavailable { path: PathBuf },
}

impl NodeConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("BARTER_DATA_DIR") {
            if !dir.trim().is_empty() {
                config.storage.data_dir = Some(PathBuf::from(dir));
            }
        }
        if let Some(value) = lookup("BARTER_SYNC_WRITES") {
            config.storage.sync_writes = parse_bool("BARTER_SYNC_WRITES", &value)?;
        }
        if let Some(value) = lookup("BARTER_STRICT_OUTCOMES") {
            config.ledger.strict_outcomes = parse_bool("BARTER_STRICT_OUTCOMES", &value)?;
        }
        if let Some(value) = lookup("BARTER_AUTO_CLEAN") {
            config.ledger.clean_after_mutation = parse_bool("BARTER_AUTO_CLEAN", &value)?;
        }
        if let Some(key) = lookup("BARTER_INDEX_KEY") {
            config.ledger.keys.invoice_index = non_empty("BARTER_INDEX_KEY", key)?;
        }
        if let Some(key) = lookup("BARTER_BOOK_KEY") {
            config.ledger.keys.open_trades = non_empty("BARTER_BOOK_KEY", key)?;
        }
        if let Some(filter) = lookup("RUST_LOG") {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }

        Ok(config)
    }

    /// Reject configurations the node cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let keys = &self.ledger.keys;
        if keys.invoice_index == keys.open_trades {
            return Err(ConfigError::KeyCollision {
                key: keys.invoice_index.clone(),
            });
        }
        #[cfg(not(feature = "rocksdb"))]
        if let Some(path) = &self.storage.data_dir {
            return Err(ConfigError::RocksDbUnavailable { path: path.clone() });
        }
        Ok(())
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}

fn non_empty(var: &'static str, value: String) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyValue { var });
    }
    Ok(value)
}
