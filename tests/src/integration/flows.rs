//! # Ledger Flows
//!
//! Multi-step scenarios through the `BarterLedgerApi`: registry, transfer,
//! order book, matcher and janitor working over one state store.

#[cfg(test)]
mod tests {
    use barter_ledger::test_utils::{sample_invoice, test_service, FaultyStateStore, ManualClock};
    use barter_ledger::{
        Attributes, BarterLedgerApi, BarterLedgerService, ErrorKind, LedgerConfig, RemoveOutcome,
        StateStore, TradeOutcome, TradeRequest, DEFAULT_INVOICE_INDEX_KEY,
    };
    use std::sync::Arc;

    fn attrs(material: &str, quantity: i64) -> Attributes {
        Attributes::new(material, quantity)
    }

    fn request(
        trade: &barter_ledger::OpenTrade,
        closer: &str,
        closer_invoice: &str,
        want: Attributes,
    ) -> TradeRequest {
        TradeRequest {
            trade_id: trade.timestamp,
            closer: closer.to_string(),
            closer_invoice: closer_invoice.to_string(),
            opener: Some(trade.requester.clone()),
            opener_want: want,
        }
    }

    #[test]
    fn test_chain_of_trades_moves_invoices_around() {
        let (ledger, clock) = test_service(LedgerConfig::default()).unwrap();
        ledger.create_invoice(sample_invoice("A1", "alice", "red", 16)).unwrap();
        ledger.create_invoice(sample_invoice("B1", "bob", "blue", 16)).unwrap();
        ledger.create_invoice(sample_invoice("C1", "carol", "green", 3)).unwrap();

        // bob: red for blue, fulfilled by alice.
        let t1 = ledger.open_trade("bob", attrs("red", 16), vec![attrs("blue", 16)]).unwrap();
        clock.advance(5);
        // alice (now holding blue) : green for blue, fulfilled by carol.
        let outcome = ledger
            .perform_trade(request(&t1, "alice", "A1", attrs("blue", 16)))
            .unwrap();
        assert!(outcome.is_fulfilled());

        let t2 = ledger
            .open_trade("alice", attrs("green", 3), vec![attrs("blue", 16)])
            .unwrap();
        assert!(t2.timestamp > t1.timestamp);
        let outcome = ledger
            .perform_trade(request(&t2, "carol", "C1", attrs("BLUE", 16)))
            .unwrap();
        assert_eq!(
            outcome,
            TradeOutcome::Fulfilled {
                trade_id: t2.timestamp,
                closer_invoice: "C1".to_string(),
                opener_invoice: "B1".to_string(),
            }
        );

        let owners: Vec<(String, String)> = ledger
            .list_invoices()
            .unwrap()
            .into_iter()
            .map(|i| (i.invoice_number, i.owner))
            .collect();
        assert_eq!(
            owners,
            vec![
                ("A1".to_string(), "bob".to_string()),
                ("B1".to_string(), "carol".to_string()),
                ("C1".to_string(), "alice".to_string()),
            ]
        );
        assert!(ledger.open_trades().unwrap().is_empty());
    }

    #[test]
    fn test_multi_option_trade_keeps_surviving_options() {
        let (ledger, _) = test_service(LedgerConfig::default()).unwrap();
        ledger.create_invoice(sample_invoice("B1", "bob", "blue", 16)).unwrap();
        ledger.create_invoice(sample_invoice("B2", "bob", "gold", 1)).unwrap();
        let trade = ledger
            .open_trade(
                "bob",
                attrs("red", 16),
                vec![attrs("blue", 16), attrs("gold", 1), attrs("iron", 7)],
            )
            .unwrap();

        let report = ledger.clean_book().unwrap();
        assert_eq!(report.options_removed, 1);
        assert_eq!(report.trades_removed, 0);

        // Giving away the gold invoice drops that option too.
        ledger.set_owner("B2", "dave").unwrap();
        let book = ledger.open_trades().unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book[0].timestamp, trade.timestamp);
        assert_eq!(book[0].willing, vec![attrs("blue", 16)]);
    }

    #[test]
    fn test_removed_trade_cannot_be_performed() {
        let (ledger, _) = test_service(LedgerConfig::default()).unwrap();
        ledger.create_invoice(sample_invoice("A1", "alice", "red", 16)).unwrap();
        ledger.create_invoice(sample_invoice("B1", "bob", "blue", 16)).unwrap();
        let trade = ledger
            .open_trade("bob", attrs("red", 16), vec![attrs("blue", 16)])
            .unwrap();

        assert!(matches!(
            ledger.remove_trade(trade.timestamp).unwrap(),
            RemoveOutcome::Removed { .. }
        ));
        assert!(!ledger.remove_trade(trade.timestamp).unwrap().is_removed());

        let err = ledger
            .perform_trade(request(&trade, "alice", "A1", attrs("blue", 16)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(ledger.get_invoice("A1").unwrap().owner, "alice");
    }

    #[test]
    fn test_many_creates_are_each_indexed_once() {
        let (ledger, _) = test_service(LedgerConfig::default()).unwrap();
        let keys: Vec<String> = (0..50).map(|n| format!("INV-{n:03}")).collect();
        for key in &keys {
            ledger.create_invoice(sample_invoice(key, "alice", "steel", 1)).unwrap();
        }
        for key in keys.iter().step_by(7) {
            let err = ledger
                .create_invoice(sample_invoice(key, "bob", "steel", 1))
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        }
        assert_eq!(ledger.list_invoice_keys().unwrap(), keys);
    }

    #[test]
    fn test_sequential_store_leaves_unindexed_invoice_on_partial_create() {
        // Budget for initialize (2 writes) plus the invoice record only.
        let store = Arc::new(FaultyStateStore::with_write_budget(3));
        let ledger =
            BarterLedgerService::with_clock(store.clone(), ManualClock::default(), LedgerConfig::default());
        ledger.initialize().unwrap();

        let err = ledger
            .create_invoice(sample_invoice("A1", "alice", "red", 16))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);

        // The record landed, the index append did not.
        assert!(store.get("A1").unwrap().is_some());
        assert!(ledger.list_invoice_keys().unwrap().is_empty());
        assert_eq!(
            ledger.read_raw(DEFAULT_INVOICE_INDEX_KEY).unwrap(),
            Some(b"[]".to_vec())
        );
    }

    #[test]
    fn test_soft_failure_keeps_trade_for_later_fulfilment() {
        let (ledger, _) = test_service(LedgerConfig::default()).unwrap();
        ledger.create_invoice(sample_invoice("A1", "alice", "red", 16)).unwrap();
        let trade = ledger
            .open_trade("bob", attrs("red", 16), vec![attrs("blue", 16)])
            .unwrap();

        let outcome = ledger
            .perform_trade(request(&trade, "alice", "A1", attrs("blue", 16)))
            .unwrap();
        assert!(!outcome.is_fulfilled());

        // bob acquires a blue invoice afterwards; the same trade now goes through.
        ledger.create_invoice(sample_invoice("B1", "bob", "blue", 16)).unwrap();
        let outcome = ledger
            .perform_trade(request(&trade, "alice", "A1", attrs("blue", 16)))
            .unwrap();
        assert!(outcome.is_fulfilled());
    }
}
