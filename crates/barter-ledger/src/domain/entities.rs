//! # Domain Entities
//!
//! The three record shapes persisted in the state store:
//!
//! | Record | Key | Mutated by |
//! |--------|-----|------------|
//! | [`Invoice`] | its `invoice_number` | ownership transfer (owner only) |
//! | [`InvoiceIndex`] | `LedgerKeys::invoice_index` | append on create |
//! | [`OrderBook`] | `LedgerKeys::open_trades` | open / perform / remove / janitor |

use super::errors::LedgerError;
use super::value_objects::{text_eq_ignore_case, Attributes, Timestamp, TradeId};
use serde::{Deserialize, Serialize};

// =============================================================================
// INVOICE
// =============================================================================

/// A uniquely keyed, owned invoice that can be bartered through the book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Identity and state key. Immutable once stored.
    pub invoice_number: String,
    pub vendor_id: String,
    pub customer_id: String,
    pub invoice_amount: f64,
    pub currency: String,
    /// Matchable text attribute.
    pub material: String,
    /// Matchable numeric attribute.
    pub quantity: i64,
    /// Trader currently holding the invoice. The only mutable field.
    pub owner: String,
    pub payment_date: String,
    pub status: String,
    pub new_payment_date: String,
}

impl Invoice {
    /// The attribute set the matcher compares.
    pub fn attributes(&self) -> Attributes {
        Attributes::new(self.material.clone(), self.quantity)
    }

    pub fn is_owned_by(&self, owner: &str) -> bool {
        text_eq_ignore_case(&self.owner, owner)
    }

    /// True if owned by `owner` and carrying exactly `want`.
    pub fn satisfies(&self, owner: &str, want: &Attributes) -> bool {
        self.is_owned_by(owner)
            && self.quantity == want.quantity
            && text_eq_ignore_case(&self.material, &want.material)
    }

    /// Field-level validation for records created outside the dispatch layer.
    pub fn validate(&self) -> Result<(), LedgerError> {
        let text_fields = [
            ("invoice_number", &self.invoice_number),
            ("vendor_id", &self.vendor_id),
            ("customer_id", &self.customer_id),
            ("currency", &self.currency),
            ("material", &self.material),
            ("owner", &self.owner),
            ("payment_date", &self.payment_date),
            ("status", &self.status),
            ("new_payment_date", &self.new_payment_date),
        ];
        for (field, value) in text_fields {
            if value.trim().is_empty() {
                return Err(LedgerError::invalid_field(field, "must be a non-empty string"));
            }
        }
        if !self.invoice_amount.is_finite() {
            return Err(LedgerError::invalid_field(
                "invoice_amount",
                "must be a finite number",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// INVOICE INDEX
// =============================================================================

/// Ordered, append-only list of invoice keys.
///
/// The state store has no scan operation, so this is the only way to
/// enumerate invoices. Encodes as a plain JSON array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceIndex {
    keys: Vec<String>,
}

impl InvoiceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key. Returns false (and leaves the index unchanged) if the
    /// key is already listed.
    pub fn append(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

// =============================================================================
// OPEN TRADE
// =============================================================================

/// An open barter order: the requester wants one invoice matching `want`
/// and will give any one invoice matching an entry of `willing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenTrade {
    /// Identity (millisecond creation time).
    pub timestamp: TradeId,
    pub requester: String,
    pub want: Attributes,
    /// Offered alternatives, in the requester's order.
    pub willing: Vec<Attributes>,
}

impl OpenTrade {
    pub fn new(
        timestamp: TradeId,
        requester: impl Into<String>,
        want: Attributes,
        willing: Vec<Attributes>,
    ) -> Self {
        Self {
            timestamp,
            requester: requester.into(),
            want,
            willing,
        }
    }

    /// True if `option` is one of the willing entries.
    pub fn offers(&self, option: &Attributes) -> bool {
        self.willing.iter().any(|w| w.matches(option))
    }
}

// =============================================================================
// ORDER BOOK
// =============================================================================

/// The single record holding every open trade, in opening order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    #[serde(default)]
    pub open_trades: Vec<OpenTrade>,
    /// Highest identity ever issued by this book.
    #[serde(default)]
    pub last_trade_id: TradeId,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the identity for a new order opened at `now`.
    pub fn issue_id(&mut self, now: Timestamp) -> TradeId {
        let id = TradeId::next_after(self.last_trade_id, now);
        self.last_trade_id = id;
        id
    }

    /// Append an order.
    pub fn push(&mut self, trade: OpenTrade) {
        self.last_trade_id = self.last_trade_id.max(trade.timestamp);
        self.open_trades.push(trade);
    }

    pub fn find(&self, id: TradeId) -> Option<&OpenTrade> {
        self.open_trades.iter().find(|t| t.timestamp == id)
    }

    /// Remove the first order with this identity.
    pub fn remove(&mut self, id: TradeId) -> Option<OpenTrade> {
        let position = self.open_trades.iter().position(|t| t.timestamp == id)?;
        Some(self.open_trades.remove(position))
    }

    pub fn len(&self) -> usize {
        self.open_trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open_trades.is_empty()
    }
}
