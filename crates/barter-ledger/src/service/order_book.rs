//! Order book: open, remove and perform trades.

use super::BarterLedgerService;
use crate::adapters::encode_record;
use crate::domain::{
    text_eq_ignore_case, Attributes, LedgerError, OpenTrade, RemoveOutcome, TradeId, TradeOutcome,
    TradeRequest,
};
use crate::ports::{StateStore, StateWrite, TimeSource};
use tracing::{debug, info, instrument, warn};

impl<S: StateStore, T: TimeSource> BarterLedgerService<S, T> {
    #[instrument(skip(self, want, willing), fields(want = %want, options = willing.len()))]
    pub(super) fn open_trade_inner(
        &self,
        requester: &str,
        want: Attributes,
        willing: Vec<Attributes>,
    ) -> Result<OpenTrade, LedgerError> {
        if requester.trim().is_empty() {
            return Err(LedgerError::invalid_field("requester", "must be a non-empty string"));
        }
        if want.material.trim().is_empty() {
            return Err(LedgerError::invalid_field("want", "material must be a non-empty string"));
        }
        if willing.is_empty() {
            return Err(LedgerError::invalid_field("willing", "at least one option is required"));
        }
        if willing.iter().any(|w| w.material.trim().is_empty()) {
            return Err(LedgerError::invalid_field(
                "willing",
                "material must be a non-empty string",
            ));
        }

        let mut book = self.load_book()?;
        let trade_id = book.issue_id(self.clock.now_millis());
        let trade = OpenTrade::new(trade_id, requester, want, willing);
        book.push(trade.clone());
        self.save_book(&book)?;

        info!(trade_id = %trade_id, open_trades = book.len(), "Trade opened");
        Ok(trade)
    }

    #[instrument(skip(self))]
    pub(super) fn remove_trade_inner(&self, trade_id: TradeId) -> Result<RemoveOutcome, LedgerError> {
        let mut book = self.load_book()?;
        let Some(trade) = book.remove(trade_id) else {
            debug!("Trade not in book, nothing to remove");
            return Ok(RemoveOutcome::NotFound { trade_id });
        };
        self.save_book(&book)?;
        info!(requester = %trade.requester, open_trades = book.len(), "Trade removed");
        Ok(RemoveOutcome::Removed { trade })
    }

    /// Fulfil an open trade.
    ///
    /// Checks, in order: the trade exists, the closer's invoice exists and
    /// carries the wanted attributes, the chosen option is one the trade
    /// offers, and the requester holds an invoice for that option. The two
    /// ownership rewrites and the book update are committed as one batch.
    #[instrument(skip(self, request), fields(trade_id = %request.trade_id, closer = %request.closer))]
    pub(super) fn perform_trade_inner(
        &self,
        request: &TradeRequest,
    ) -> Result<TradeOutcome, LedgerError> {
        let mut book = self.load_book()?;
        let trade = book
            .find(request.trade_id)
            .cloned()
            .ok_or(LedgerError::TradeNotFound {
                trade_id: request.trade_id,
            })?;

        if let Some(opener) = &request.opener {
            if !text_eq_ignore_case(opener, &trade.requester) {
                return Err(LedgerError::invalid_field(
                    "opener",
                    format!("{opener} did not open trade {}", trade.timestamp),
                ));
            }
        }

        let mut closer_invoice = self.get_invoice_inner(&request.closer_invoice)?;
        let offered = closer_invoice.attributes();
        if !offered.matches(&trade.want) {
            return Err(LedgerError::RequirementMismatch {
                key: closer_invoice.invoice_number,
                offered,
                wanted: trade.want,
            });
        }

        if !trade.offers(&request.opener_want) {
            return Err(LedgerError::OptionNotOffered {
                trade_id: trade.timestamp,
                option: request.opener_want.clone(),
            });
        }

        let Some(mut opener_invoice) =
            self.find_match_inner(&trade.requester, &request.opener_want)?
        else {
            warn!(
                requester = %trade.requester,
                want = %request.opener_want,
                "No suitable invoice from trade opener, trade left open"
            );
            return Ok(TradeOutcome::NoSuitableAsset {
                trade_id: trade.timestamp,
                owner: trade.requester,
                want: request.opener_want.clone(),
            });
        };

        if opener_invoice.invoice_number == closer_invoice.invoice_number {
            return Err(LedgerError::invalid_field(
                "closer_invoice",
                format!(
                    "{} is already held by {}",
                    closer_invoice.invoice_number, trade.requester
                ),
            ));
        }

        closer_invoice.owner = trade.requester.clone();
        opener_invoice.owner = request.closer.clone();
        book.remove(trade.timestamp);

        let closer_key = closer_invoice.invoice_number.clone();
        let opener_key = opener_invoice.invoice_number.clone();
        let writes = vec![
            StateWrite::new(closer_key.as_str(), encode_record(&closer_key, &closer_invoice)?),
            StateWrite::new(opener_key.as_str(), encode_record(&opener_key, &opener_invoice)?),
            self.book_write(&book)?,
        ];
        self.store.put_batch(writes)?;

        info!(
            requester = %trade.requester,
            closer_invoice = %closer_key,
            opener_invoice = %opener_key,
            "Trade fulfilled"
        );
        Ok(TradeOutcome::Fulfilled {
            trade_id: trade.timestamp,
            closer_invoice: closer_key,
            opener_invoice: opener_key,
        })
    }
}
