//! Asset registry: invoice records and the invoice index.

use super::BarterLedgerService;
use crate::adapters::{decode_record, encode_record};
use crate::domain::{Invoice, LedgerError};
use crate::ports::{StateStore, StateWrite, TimeSource};
use tracing::{debug, info, instrument, warn};

impl<S: StateStore, T: TimeSource> BarterLedgerService<S, T> {
    #[instrument(skip(self, invoice), fields(invoice = %invoice.invoice_number))]
    pub(super) fn create_invoice_inner(&self, invoice: Invoice) -> Result<Invoice, LedgerError> {
        invoice.validate()?;
        let key = invoice.invoice_number.as_str();
        if self.config.keys.is_reserved(key) {
            return Err(LedgerError::invalid_field(
                "invoice_number",
                format!("{key} is a reserved ledger key"),
            ));
        }

        // Existence is decided on the decoded identity, not on presence.
        if let Some(bytes) = self.store.get(key)? {
            match decode_record::<Invoice>(key, &bytes) {
                Ok(existing) if existing.invoice_number == key => {
                    debug!("Invoice already exists");
                    return Err(LedgerError::AlreadyExists {
                        key: key.to_string(),
                    });
                }
                Ok(_) => debug!("Key holds an invoice with a different identity, overwriting"),
                Err(e) => warn!(error = %e, "Key holds a non-invoice value, overwriting"),
            }
        }

        let mut index = self.load_index()?;
        let appended = index.append(key);
        if !appended {
            warn!("Key already listed in the invoice index");
        }

        let mut writes = vec![StateWrite::new(key, encode_record(key, &invoice)?)];
        if appended {
            writes.push(self.index_write(&index)?);
        }
        self.store.put_batch(writes)?;

        info!(
            owner = %invoice.owner,
            material = %invoice.material,
            quantity = invoice.quantity,
            index_size = index.len(),
            "Invoice created"
        );
        Ok(invoice)
    }

    /// Load an invoice that must exist.
    pub(super) fn get_invoice_inner(&self, key: &str) -> Result<Invoice, LedgerError> {
        let not_found = || LedgerError::InvoiceNotFound {
            key: key.to_string(),
        };
        let bytes = self.store.get(key)?.ok_or_else(not_found)?;
        // A value that is not an invoice under its own key counts as absent.
        match decode_record::<Invoice>(key, &bytes) {
            Ok(invoice) if invoice.invoice_number == key => Ok(invoice),
            Ok(_) => Err(not_found()),
            Err(e) => {
                debug!(key = %key, error = %e, "Key does not hold an invoice");
                Err(not_found())
            }
        }
    }

    /// Load an invoice reached through the index.
    ///
    /// Missing or undecodable entries yield `Ok(None)` so that one damaged
    /// record does not block matching against the rest. Store failures are
    /// still returned.
    pub(super) fn load_indexed_invoice(&self, key: &str) -> Result<Option<Invoice>, LedgerError> {
        match self.get_invoice_inner(key) {
            Ok(invoice) => Ok(Some(invoice)),
            Err(LedgerError::InvoiceNotFound { .. }) => {
                warn!(invoice = %key, "Skipping unreadable index entry");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Every loadable invoice, in index order.
    pub(super) fn load_invoices(&self) -> Result<Vec<Invoice>, LedgerError> {
        let index = self.load_index()?;
        let mut invoices = Vec::with_capacity(index.len());
        for key in index.keys() {
            if let Some(invoice) = self.load_indexed_invoice(key)? {
                invoices.push(invoice);
            }
        }
        Ok(invoices)
    }
}
