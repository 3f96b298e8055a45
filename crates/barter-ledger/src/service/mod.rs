//! # Ledger Service
//!
//! Application service implementing [`BarterLedgerApi`] on top of a
//! [`StateStore`].
//!
//! ## Write Discipline
//!
//! The state store offers no multi-key transactions, and every operation is a
//! read-modify-write over one or more records. The service therefore holds a
//! single mutex for the whole duration of each public operation, including
//! the janitor pass that follows a mutation. Multi-record writes (invoice +
//! index on create, two transfers + book on fulfilment) go through
//! [`StateStore::put_batch`] so that backends with native batches commit them
//! atomically.
//!
//! ## Submodules
//!
//! - `registry` - invoice create / lookup / enumeration
//! - `transfer` - ownership rewrite
//! - `order_book` - open / remove / perform
//! - `matcher` - index walk for the trade matcher
//! - `janitor` - book cleanup

mod janitor;
mod matcher;
mod order_book;
mod registry;
mod transfer;


use crate::adapters::{decode_record, encode_record};
use crate::domain::{
    Attributes, CleanReport, Invoice, InvoiceIndex, LedgerConfig, LedgerError, OpenTrade,
    OrderBook, RemoveOutcome, TradeId, TradeOutcome, TradeRequest,
};
use crate::ports::{BarterLedgerApi, StateStore, StateWrite, SystemTimeSource, TimeSource};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The invoice barter ledger.
pub struct BarterLedgerService<S: StateStore, T: TimeSource = SystemTimeSource> {
    store: Arc<S>,
    clock: T,
    config: LedgerConfig,
    /// Serializes every public operation.
    write_lock: Mutex<()>,
}

impl<S: StateStore> BarterLedgerService<S, SystemTimeSource> {
    /// Create a service using the system clock.
    pub fn new(store: Arc<S>, config: LedgerConfig) -> Self {
        Self::with_clock(store, SystemTimeSource, config)
    }
}

impl<S: StateStore, T: TimeSource> BarterLedgerService<S, T> {
    /// Create a service with a custom clock.
    pub fn with_clock(store: Arc<S>, clock: T, config: LedgerConfig) -> Self {
        Self {
            store,
            clock,
            config,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // =========================================================================
    // SINGLETON RECORDS
    // =========================================================================

    /// Load the invoice index. A missing record reads as empty.
    fn load_index(&self) -> Result<InvoiceIndex, LedgerError> {
        let key = &self.config.keys.invoice_index;
        match self.store.get(key)? {
            Some(bytes) => decode_record(key, &bytes),
            None => {
                debug!(key = %key, "Invoice index not initialized, reading as empty");
                Ok(InvoiceIndex::new())
            }
        }
    }

    /// Load the order book. A missing record reads as empty.
    fn load_book(&self) -> Result<OrderBook, LedgerError> {
        let key = &self.config.keys.open_trades;
        match self.store.get(key)? {
            Some(bytes) => decode_record(key, &bytes),
            None => {
                debug!(key = %key, "Order book not initialized, reading as empty");
                Ok(OrderBook::new())
            }
        }
    }

    fn book_write(&self, book: &OrderBook) -> Result<StateWrite, LedgerError> {
        let key = &self.config.keys.open_trades;
        Ok(StateWrite::new(key.as_str(), encode_record(key, book)?))
    }

    fn index_write(&self, index: &InvoiceIndex) -> Result<StateWrite, LedgerError> {
        let key = &self.config.keys.invoice_index;
        Ok(StateWrite::new(key.as_str(), encode_record(key, index)?))
    }

    fn save_book(&self, book: &OrderBook) -> Result<(), LedgerError> {
        let write = self.book_write(book)?;
        self.store.put(&write.key, &write.value)?;
        Ok(())
    }

    fn initialize_inner(&self, overwrite: bool) -> Result<(), LedgerError> {
        let keys = &self.config.keys;
        let mut writes = Vec::with_capacity(2);
        if overwrite || self.store.get(&keys.invoice_index)?.is_none() {
            writes.push(self.index_write(&InvoiceIndex::new())?);
        }
        if overwrite || self.store.get(&keys.open_trades)?.is_none() {
            writes.push(self.book_write(&OrderBook::new())?);
        }
        if writes.is_empty() {
            debug!("Ledger records already initialized");
            return Ok(());
        }
        let written = writes.len();
        self.store.put_batch(writes)?;
        info!(records = written, overwrite, "Ledger records initialized");
        Ok(())
    }

    /// Hand a soft outcome back as is, or as its error in strict mode.
    fn apply_policy<O>(
        &self,
        outcome: O,
        strict: fn(O) -> Result<O, LedgerError>,
    ) -> Result<O, LedgerError> {
        if self.config.strict_outcomes {
            strict(outcome)
        } else {
            Ok(outcome)
        }
    }

    /// Follow-up janitor pass after a mutation. Its failure is logged, not
    /// returned: the mutation itself has already been committed.
    fn clean_after_mutation(&self) {
        if !self.config.clean_after_mutation {
            return;
        }
        if let Err(e) = self.clean_book_inner() {
            warn!(error = %e, "Janitor pass after mutation failed");
        }
    }
}

// =============================================================================
// API IMPLEMENTATION
// =============================================================================

impl<S: StateStore, T: TimeSource> BarterLedgerApi for BarterLedgerService<S, T> {
    fn initialize(&self) -> Result<(), LedgerError> {
        let _guard = self.write_lock.lock();
        self.initialize_inner(false)
    }

    fn reset(&self) -> Result<(), LedgerError> {
        let _guard = self.write_lock.lock();
        self.initialize_inner(true)
    }

    fn create_invoice(&self, invoice: Invoice) -> Result<Invoice, LedgerError> {
        let _guard = self.write_lock.lock();
        self.create_invoice_inner(invoice)
    }

    fn get_invoice(&self, key: &str) -> Result<Invoice, LedgerError> {
        let _guard = self.write_lock.lock();
        self.get_invoice_inner(key)
    }

    fn list_invoice_keys(&self) -> Result<Vec<String>, LedgerError> {
        let _guard = self.write_lock.lock();
        Ok(self.load_index()?.keys().to_vec())
    }

    fn list_invoices(&self) -> Result<Vec<Invoice>, LedgerError> {
        let _guard = self.write_lock.lock();
        self.load_invoices()
    }

    fn set_owner(&self, key: &str, new_owner: &str) -> Result<Invoice, LedgerError> {
        let _guard = self.write_lock.lock();
        let updated = self.set_owner_inner(key, new_owner)?;
        self.clean_after_mutation();
        Ok(updated)
    }

    fn open_trade(
        &self,
        requester: &str,
        want: Attributes,
        willing: Vec<Attributes>,
    ) -> Result<OpenTrade, LedgerError> {
        let _guard = self.write_lock.lock();
        self.open_trade_inner(requester, want, willing)
    }

    fn remove_trade(&self, trade_id: TradeId) -> Result<RemoveOutcome, LedgerError> {
        let _guard = self.write_lock.lock();
        let outcome = self.remove_trade_inner(trade_id)?;
        if !outcome.is_removed() {
            return self.apply_policy(outcome, RemoveOutcome::into_strict);
        }
        self.clean_after_mutation();
        Ok(outcome)
    }

    fn perform_trade(&self, request: TradeRequest) -> Result<TradeOutcome, LedgerError> {
        let _guard = self.write_lock.lock();
        let outcome = self.perform_trade_inner(&request)?;
        // A soft failure leaves the book exactly as it was.
        if !outcome.is_fulfilled() {
            return self.apply_policy(outcome, TradeOutcome::into_strict);
        }
        self.clean_after_mutation();
        Ok(outcome)
    }

    fn open_trades(&self) -> Result<Vec<OpenTrade>, LedgerError> {
        let _guard = self.write_lock.lock();
        Ok(self.load_book()?.open_trades)
    }

    fn find_match(&self, owner: &str, want: &Attributes) -> Result<Option<Invoice>, LedgerError> {
        let _guard = self.write_lock.lock();
        self.find_match_inner(owner, want)
    }

    fn clean_book(&self) -> Result<CleanReport, LedgerError> {
        let _guard = self.write_lock.lock();
        self.clean_book_inner()
    }

    fn read_raw(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        let _guard = self.write_lock.lock();
        Ok(self.store.get(key)?)
    }
}
