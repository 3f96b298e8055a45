//! Ownership transfer.

use super::BarterLedgerService;
use crate::adapters::encode_record;
use crate::domain::{Invoice, LedgerError};
use crate::ports::{StateStore, TimeSource};
use tracing::{info, instrument};

impl<S: StateStore, T: TimeSource> BarterLedgerService<S, T> {
    #[instrument(skip(self))]
    pub(super) fn set_owner_inner(&self, key: &str, new_owner: &str) -> Result<Invoice, LedgerError> {
        if new_owner.trim().is_empty() {
            return Err(LedgerError::invalid_field("owner", "must be a non-empty string"));
        }
        let mut invoice = self.get_invoice_inner(key)?;
        let previous = std::mem::replace(&mut invoice.owner, new_owner.to_string());
        self.store.put(key, &encode_record(key, &invoice)?)?;
        info!(from = %previous, to = %new_owner, "Invoice owner changed");
        Ok(invoice)
    }
}
