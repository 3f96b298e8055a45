//! Book janitor.

use super::BarterLedgerService;
use crate::domain::{prune_unsatisfiable, CleanReport, LedgerError};
use crate::ports::{StateStore, TimeSource};
use tracing::{debug, info};

impl<S: StateStore, T: TimeSource> BarterLedgerService<S, T> {
    /// Drop unsatisfiable options and optionless trades. The book is written
    /// back only if something changed.
    ///
    /// The registry is loaded once per pass; nothing writes in between, so
    /// every option is judged against the same snapshot the matcher would
    /// see one lookup at a time.
    pub(super) fn clean_book_inner(&self) -> Result<CleanReport, LedgerError> {
        let mut book = self.load_book()?;
        if book.is_empty() {
            debug!("Order book is empty, nothing to clean");
            return Ok(CleanReport::default());
        }

        let invoices = self.load_invoices()?;
        let report = prune_unsatisfiable(&mut book, &invoices);

        if report.changed() {
            self.save_book(&book)?;
            info!(
                trades_checked = report.trades_checked,
                options_removed = report.options_removed,
                trades_removed = report.trades_removed,
                remaining = book.len(),
                "Order book cleaned"
            );
        } else {
            debug!(trades_checked = report.trades_checked, "All open trades are satisfiable");
        }
        Ok(report)
    }
}
