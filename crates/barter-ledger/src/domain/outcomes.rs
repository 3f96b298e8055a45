//! # Operation Outcomes
//!
//! Requests and result variants of the order book operations. Removing an
//! unknown trade and fulfilling a trade whose requester no longer holds a
//! suitable invoice are soft failures: they come back as variants here, and
//! [`RemoveOutcome::into_strict`] / [`TradeOutcome::into_strict`] turn them
//! into errors for callers that want the strict policy.

use super::entities::OpenTrade;
use super::errors::LedgerError;
use super::value_objects::{Attributes, TradeId};
use serde::Serialize;

/// Fulfilment request for an open trade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeRequest {
    pub trade_id: TradeId,
    /// Identity receiving the requester's invoice.
    pub closer: String,
    /// Key of the invoice the closer gives away.
    pub closer_invoice: String,
    /// Expected requester of the trade, if the caller named one.
    pub opener: Option<String>,
    /// Which of the trade's willing options the closer takes.
    pub opener_want: Attributes,
}

/// Result of removing a trade from the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RemoveOutcome {
    Removed { trade: OpenTrade },
    NotFound { trade_id: TradeId },
}

impl RemoveOutcome {
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed { .. })
    }

    pub fn into_strict(self) -> Result<Self, LedgerError> {
        match self {
            Self::NotFound { trade_id } => Err(LedgerError::TradeNotFound { trade_id }),
            removed => Ok(removed),
        }
    }
}

/// Result of a fulfilment attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TradeOutcome {
    /// Both invoices changed hands and the trade left the book.
    Fulfilled {
        trade_id: TradeId,
        /// Closer's invoice, now owned by the requester.
        closer_invoice: String,
        /// Requester's invoice, now owned by the closer.
        opener_invoice: String,
    },
    /// The requester holds no invoice matching the chosen option. Nothing
    /// was written.
    NoSuitableAsset {
        trade_id: TradeId,
        owner: String,
        want: Attributes,
    },
}

impl TradeOutcome {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Self::Fulfilled { .. })
    }

    pub fn into_strict(self) -> Result<Self, LedgerError> {
        match self {
            Self::NoSuitableAsset { owner, want, .. } => {
                Err(LedgerError::NoSuitableAsset { owner, want })
            }
            fulfilled => Ok(fulfilled),
        }
    }
}

/// Summary of one janitor pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    /// Trades inspected.
    pub trades_checked: usize,
    /// Willing options dropped because no invoice satisfies them.
    pub options_removed: usize,
    /// Trades dropped because no willing option remained.
    pub trades_removed: usize,
}

impl CleanReport {
    /// True if the pass modified the book.
    pub fn changed(&self) -> bool {
        self.options_removed > 0 || self.trades_removed > 0
    }
}
