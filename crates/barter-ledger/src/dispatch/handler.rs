//! Dispatcher from positional invocations to the ledger API.

use super::command::Command;
use super::function::LedgerFunction;
use crate::domain::{LedgerError, LedgerErrorPayload};
use crate::ports::BarterLedgerApi;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Routes `(function, args)` invocations to a [`BarterLedgerApi`].
///
/// Responses are JSON documents, except for `read`, which returns the stored
/// bytes unchanged (empty when the key is absent). Soft outcomes are
/// returned or raised according to the ledger's own configuration.
pub struct LedgerDispatcher<L: BarterLedgerApi> {
    ledger: Arc<L>,
}

impl<L: BarterLedgerApi> LedgerDispatcher<L> {
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// Parse and execute any function.
    #[instrument(skip(self, args), fields(args = args.len()))]
    pub fn invoke<A: AsRef<str>>(&self, function: &str, args: &[A]) -> Result<Vec<u8>, LedgerError> {
        let command = Command::parse(function, args)?;
        self.execute(command)
    }

    /// Parse and execute a read-only function. Mutating functions are
    /// rejected before any argument is looked at.
    pub fn query<A: AsRef<str>>(&self, function: &str, args: &[A]) -> Result<Vec<u8>, LedgerError> {
        let parsed: LedgerFunction = function.parse()?;
        if !parsed.is_query() {
            return Err(LedgerError::UnknownFunction(format!(
                "{function} is not a query function"
            )));
        }
        self.invoke(function, args)
    }

    /// Execute an already parsed command.
    pub fn execute(&self, command: Command) -> Result<Vec<u8>, LedgerError> {
        let function = command.function();
        debug!(function = %function, "Executing ledger command");

        match command {
            Command::Init => {
                self.ledger.reset()?;
                Ok(Vec::new())
            }
            Command::CreateInvoice(invoice) => respond(&self.ledger.create_invoice(invoice)?),
            Command::SetOwner { key, owner } => respond(&self.ledger.set_owner(&key, &owner)?),
            Command::OpenTrade {
                requester,
                want,
                willing,
            } => respond(&self.ledger.open_trade(&requester, want, willing)?),
            Command::PerformTrade(request) => respond(&self.ledger.perform_trade(request)?),
            Command::RemoveTrade(trade_id) => respond(&self.ledger.remove_trade(trade_id)?),
            Command::CleanTrades => respond(&self.ledger.clean_book()?),
            Command::Read { key } => Ok(self.ledger.read_raw(&key)?.unwrap_or_default()),
            Command::ListInvoices => respond(&self.ledger.list_invoices()?),
            Command::ListTrades => respond(&self.ledger.open_trades()?),
        }
    }
}

/// Render an error the way callers of the dispatcher receive it.
pub fn error_response(err: &LedgerError) -> Vec<u8> {
    let payload = LedgerErrorPayload::from(err);
    serde_json::to_vec(&payload).unwrap_or_else(|_| err.to_string().into_bytes())
}

fn respond<T: Serialize>(value: &T) -> Result<Vec<u8>, LedgerError> {
    serde_json::to_vec(value).map_err(|e| LedgerError::Codec {
        key: "response".to_string(),
        message: e.to_string(),
    })
}
