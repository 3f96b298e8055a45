//! # Ledger Container
//!
//! Wires configuration, state store, service and dispatcher together.
//!
//! ## Startup Sequence
//!
//! 1. Validate configuration
//! 2. Open the configured state store
//! 3. Create the index and book records if they are missing
//! 4. Hand invocations to the dispatcher

pub mod config;

pub use config::{ConfigError, NodeConfig, StorageConfig};

use crate::adapters::NodeStore;
use barter_ledger::{
    error_response, BarterLedgerApi, BarterLedgerService, LedgerDispatcher, LedgerError,
    StoreError,
};
use std::io::{BufRead, Write};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Node startup and scripting failures.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to open state store: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("script line {line}: {reason}")]
    Script { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Counters reported after a script run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    pub invoked: usize,
    pub failed: usize,
}

/// A running ledger: service over the configured store plus its dispatcher.
pub struct LedgerNode {
    dispatcher: LedgerDispatcher<BarterLedgerService<NodeStore>>,
}

impl LedgerNode {
    pub fn open(config: &NodeConfig) -> Result<Self, NodeError> {
        config.validate()?;

        let store = NodeStore::open(&config.storage)?;
        let backend = store.backend_name();
        let service = BarterLedgerService::new(Arc::new(store), config.ledger.clone());
        service.initialize()?;

        info!(
            backend,
            strict_outcomes = config.ledger.strict_outcomes,
            auto_clean = config.ledger.clean_after_mutation,
            "Ledger node ready"
        );
        Ok(Self {
            dispatcher: LedgerDispatcher::new(Arc::new(service)),
        })
    }

    pub fn invoke<A: AsRef<str>>(&self, function: &str, args: &[A]) -> Result<Vec<u8>, LedgerError> {
        self.dispatcher.invoke(function, args)
    }

    /// Replay JSON-lines invocations (`["function", "arg", ...]`).
    ///
    /// Blank lines and lines starting with `#` are skipped. Each invocation
    /// writes one output line: the response, or the error payload. A line
    /// that is not a JSON array of strings aborts the run.
    pub fn run_script<R: BufRead, W: Write>(
        &self,
        reader: R,
        mut out: W,
    ) -> Result<ScriptSummary, NodeError> {
        let mut summary = ScriptSummary::default();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = number + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let call: Vec<String> =
                serde_json::from_str(trimmed).map_err(|e| NodeError::Script {
                    line: line_no,
                    reason: format!("expected a JSON array of strings: {e}"),
                })?;
            let Some((function, args)) = call.split_first() else {
                return Err(NodeError::Script {
                    line: line_no,
                    reason: "empty invocation".to_string(),
                });
            };

            summary.invoked += 1;
            match self.invoke(function, args) {
                Ok(response) => out.write_all(&response)?,
                Err(e) => {
                    summary.failed += 1;
                    warn!(line = line_no, function = %function, error = %e, "Invocation failed");
                    out.write_all(&error_response(&e))?;
                }
            }
            out.write_all(b"\n")?;
        }

        info!(invoked = summary.invoked, failed = summary.failed, "Script finished");
        Ok(summary)
    }
}
