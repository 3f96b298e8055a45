//! Function names accepted by the dispatcher.

use crate::domain::LedgerError;
use std::fmt;
use std::str::FromStr;

/// A ledger function callable through positional string arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerFunction {
    /// Reset the index and book to empty records.
    Init,
    CreateInvoice,
    SetOwner,
    OpenTrade,
    PerformTrade,
    RemoveTrade,
    CleanTrades,
    Read,
    ListInvoices,
    ListTrades,
}

impl LedgerFunction {
    pub const ALL: [LedgerFunction; 10] = [
        Self::Init,
        Self::CreateInvoice,
        Self::SetOwner,
        Self::OpenTrade,
        Self::PerformTrade,
        Self::RemoveTrade,
        Self::CleanTrades,
        Self::Read,
        Self::ListInvoices,
        Self::ListTrades,
    ];

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::CreateInvoice => "create_invoice",
            Self::SetOwner => "set_owner",
            Self::OpenTrade => "open_trade",
            Self::PerformTrade => "perform_trade",
            Self::RemoveTrade => "remove_trade",
            Self::CleanTrades => "clean_trades",
            Self::Read => "read",
            Self::ListInvoices => "list_invoices",
            Self::ListTrades => "list_trades",
        }
    }

    /// Alternative names accepted on input.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Init => &["reset"],
            Self::SetOwner => &["set_user"],
            Self::CleanTrades => &["clean_book"],
            _ => &[],
        }
    }

    /// True for functions that never write state.
    pub fn is_query(&self) -> bool {
        matches!(self, Self::Read | Self::ListInvoices | Self::ListTrades)
    }
}

impl fmt::Display for LedgerFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LedgerFunction {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s || f.aliases().contains(&s))
            .ok_or_else(|| LedgerError::UnknownFunction(s.to_string()))
    }
}
