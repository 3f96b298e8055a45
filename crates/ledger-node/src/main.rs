//! # Ledger Node
//!
//! Command-line host for the barter ledger.
//!
//! ```text
//! ledger-node invoke create_invoice V C A1 10.5 USD red 16 alice 2016-06-30 open 2016-07-30
//! ledger-node --data-dir ./data/ledger script trades.jsonl
//! ```
//!
//! Responses go to stdout, logs to stderr.

use anyhow::{Context, Result};
use barter_ledger::error_response;
use clap::{Parser, Subcommand};
use ledger_node::{LedgerNode, NodeConfig};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ledger-node")]
#[command(about = "Invoice registry and barter order book over a key-value state store")]
struct Args {
    /// RocksDB data directory (overrides BARTER_DATA_DIR; omit for in-memory)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Report unknown trades and missing opener invoices as errors
    #[arg(long)]
    strict: bool,

    /// Skip the janitor pass after mutations
    #[arg(long)]
    no_auto_clean: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Invoke one ledger function with positional arguments
    Invoke {
        function: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Replay a JSON-lines file of ["function", "arg", ...] invocations
    Script { path: PathBuf },
}

fn load_config(args: &Args) -> Result<NodeConfig> {
    let mut config = NodeConfig::from_env().context("invalid environment configuration")?;
    if let Some(dir) = &args.data_dir {
        config.storage.data_dir = Some(dir.clone());
    }
    if args.strict {
        config.ledger.strict_outcomes = true;
    }
    if args.no_auto_clean {
        config.ledger.clean_after_mutation = false;
    }
    Ok(config)
}

fn init_logging(filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter).with_context(|| format!("invalid log filter {filter:?}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config = load_config(&args)?;
    init_logging(&config.log_filter)?;

    let node = LedgerNode::open(&config).context("failed to start ledger node")?;
    let mut stdout = io::stdout().lock();

    match args.command {
        Command::Invoke { function, args } => match node.invoke(&function, &args) {
            Ok(response) => {
                stdout.write_all(&response)?;
                stdout.write_all(b"\n")?;
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                stdout.write_all(&error_response(&e))?;
                stdout.write_all(b"\n")?;
                Ok(ExitCode::FAILURE)
            }
        },
        Command::Script { path } => {
            let file = File::open(&path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            let summary = node.run_script(BufReader::new(file), &mut stdout)?;
            info!(invoked = summary.invoked, failed = summary.failed, "Done");
            Ok(if summary.failed == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
