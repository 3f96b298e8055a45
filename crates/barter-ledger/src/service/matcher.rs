//! Trade matcher: linear walk of the invoice index.

use super::BarterLedgerService;
use crate::domain::{Attributes, Invoice, LedgerError};
use crate::ports::{StateStore, TimeSource};
use tracing::{debug, trace};

impl<S: StateStore, T: TimeSource> BarterLedgerService<S, T> {
    /// Load invoices in index order and stop at the first one owned by
    /// `owner` with attributes `want`.
    pub(super) fn find_match_inner(
        &self,
        owner: &str,
        want: &Attributes,
    ) -> Result<Option<Invoice>, LedgerError> {
        let index = self.load_index()?;
        for key in index.keys() {
            let Some(invoice) = self.load_indexed_invoice(key)? else {
                continue;
            };
            trace!(invoice = %key, owner = %invoice.owner, attributes = %invoice.attributes(), "Inspecting");
            if invoice.satisfies(owner, want) {
                debug!(invoice = %key, owner, want = %want, "Found invoice for trade");
                return Ok(Some(invoice));
            }
        }
        debug!(owner, want = %want, scanned = index.len(), "No invoice for trade");
        Ok(None)
    }
}
