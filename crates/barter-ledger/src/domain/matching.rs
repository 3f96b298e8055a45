//! # Trade Matching
//!
//! Pure predicate logic over already-loaded invoices. The service layer is
//! responsible for walking the invoice index and loading records; nothing in
//! here touches the state store.

use super::entities::{Invoice, OrderBook};
use super::outcomes::CleanReport;
use super::value_objects::Attributes;

/// First invoice, in iteration order, owned by `owner` with attributes `want`.
pub fn find_match<'a, I>(invoices: I, owner: &str, want: &Attributes) -> Option<&'a Invoice>
where
    I: IntoIterator<Item = &'a Invoice>,
{
    invoices
        .into_iter()
        .find(|invoice| invoice.satisfies(owner, want))
}

/// Drop every willing option no invoice can satisfy for its requester, then
/// every trade left without options.
///
/// `invoices` must be the full registry in index order. Order of the
/// surviving trades and options is preserved.
pub fn prune_unsatisfiable(book: &mut OrderBook, invoices: &[Invoice]) -> CleanReport {
    let mut report = CleanReport {
        trades_checked: book.open_trades.len(),
        ..CleanReport::default()
    };

    for trade in &mut book.open_trades {
        let before = trade.willing.len();
        let requester = trade.requester.as_str();
        trade
            .willing
            .retain(|option| find_match(invoices, requester, option).is_some());
        report.options_removed += before - trade.willing.len();
    }

    let before = book.open_trades.len();
    book.open_trades.retain(|trade| !trade.willing.is_empty());
    report.trades_removed = before - book.open_trades.len();

    report
}
