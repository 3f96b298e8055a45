//! # Inbound Ports (Driving Ports)
//!
//! The API offered to the dispatch layer and to embedding hosts.

use crate::domain::{
    Attributes, CleanReport, Invoice, LedgerError, OpenTrade, RemoveOutcome, TradeId,
    TradeOutcome, TradeRequest,
};

/// Primary API of the invoice barter ledger.
///
/// Every method runs to completion under the service's single-writer lock,
/// so two calls never interleave their read-modify-write sequences.
pub trait BarterLedgerApi: Send + Sync {
    // === Lifecycle ===

    /// Create the empty index and book records if they are missing.
    fn initialize(&self) -> Result<(), LedgerError>;

    /// Overwrite the index and book records with empty ones.
    fn reset(&self) -> Result<(), LedgerError>;

    // === Asset Registry ===

    /// Store a new invoice and append it to the index.
    fn create_invoice(&self, invoice: Invoice) -> Result<Invoice, LedgerError>;

    fn get_invoice(&self, key: &str) -> Result<Invoice, LedgerError>;

    /// Invoice keys in creation order.
    fn list_invoice_keys(&self) -> Result<Vec<String>, LedgerError>;

    /// Every invoice that can still be loaded, in index order.
    fn list_invoices(&self) -> Result<Vec<Invoice>, LedgerError>;

    // === Ownership Transfer ===

    /// Rewrite an invoice's owner. Returns the updated invoice.
    fn set_owner(&self, key: &str, new_owner: &str) -> Result<Invoice, LedgerError>;

    // === Order Book ===

    fn open_trade(
        &self,
        requester: &str,
        want: Attributes,
        willing: Vec<Attributes>,
    ) -> Result<OpenTrade, LedgerError>;

    fn remove_trade(&self, trade_id: TradeId) -> Result<RemoveOutcome, LedgerError>;

    fn perform_trade(&self, request: TradeRequest) -> Result<TradeOutcome, LedgerError>;

    fn open_trades(&self) -> Result<Vec<OpenTrade>, LedgerError>;

    // === Matching ===

    /// First invoice in index order owned by `owner` with attributes `want`.
    fn find_match(&self, owner: &str, want: &Attributes) -> Result<Option<Invoice>, LedgerError>;

    /// Janitor pass over the whole book.
    fn clean_book(&self) -> Result<CleanReport, LedgerError>;

    // === Raw access ===

    /// Bytes stored at `key`, if any.
    fn read_raw(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;
}
