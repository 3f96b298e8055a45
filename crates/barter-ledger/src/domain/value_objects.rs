//! # Value Objects
//!
//! Immutable types shared by the registry, the order book and the matcher.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Default state key of the invoice index record.
pub const DEFAULT_INVOICE_INDEX_KEY: &str = "_invoiceindex";

/// Default state key of the order book record.
pub const DEFAULT_OPEN_TRADES_KEY: &str = "_opentrades";

// =============================================================================
// ATTRIBUTES
// =============================================================================

/// The matchable attribute set of an invoice.
///
/// The same shape is used as a trade predicate: an order's `want` and each of
/// its `willing` options are attribute sets that an invoice must match
/// exactly. Materials compare case-insensitively, quantities numerically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attributes {
    /// Text attribute (what the invoice is for).
    pub material: String,
    /// Numeric attribute (how much of it).
    pub quantity: i64,
}

impl Attributes {
    pub fn new(material: impl Into<String>, quantity: i64) -> Self {
        Self {
            material: material.into(),
            quantity,
        }
    }

    /// Exact attribute match used by the trade matcher.
    pub fn matches(&self, other: &Attributes) -> bool {
        self.quantity == other.quantity && text_eq_ignore_case(&self.material, &other.material)
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.material, self.quantity)
    }
}

/// Attribute predicate of a trade order.
pub type TradeWant = Attributes;

/// Case-insensitive text comparison (full Unicode lowercase folding).
pub fn text_eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

// =============================================================================
// TRADE IDENTITY
// =============================================================================

/// Identity of an open trade.
///
/// Derived from the millisecond creation time. Issued through
/// [`TradeId::next_after`] so that two orders opened within the same
/// millisecond still receive distinct, increasing identities.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TradeId(pub u64);

impl TradeId {
    /// Next identity given the last one issued and the current time.
    pub fn next_after(last: TradeId, now: Timestamp) -> TradeId {
        TradeId(now.max(last.0.saturating_add(1)))
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TradeId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TradeId)
    }
}

impl From<u64> for TradeId {
    fn from(value: u64) -> Self {
        TradeId(value)
    }
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Well-known state keys of the singleton ledger records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerKeys {
    /// Key of the invoice index (ordered list of invoice keys).
    pub invoice_index: String,
    /// Key of the order book (all open trades).
    pub open_trades: String,
}

impl LedgerKeys {
    /// Returns true if `key` names one of the singleton records.
    pub fn is_reserved(&self, key: &str) -> bool {
        key == self.invoice_index || key == self.open_trades
    }
}

impl Default for LedgerKeys {
    fn default() -> Self {
        Self {
            invoice_index: DEFAULT_INVOICE_INDEX_KEY.to_string(),
            open_trades: DEFAULT_OPEN_TRADES_KEY.to_string(),
        }
    }
}

/// Ledger service configuration.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Singleton record keys.
    pub keys: LedgerKeys,
    /// Surface soft outcomes (unknown trade on removal, no suitable opener
    /// invoice on fulfilment) as errors instead of successful results.
    pub strict_outcomes: bool,
    /// Run a janitor pass after every operation that can invalidate a match.
    pub clean_after_mutation: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            keys: LedgerKeys::default(),
            strict_outcomes: false,
            clean_after_mutation: true,
        }
    }
}
