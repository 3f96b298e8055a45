//! # Single-Writer Discipline
//!
//! Concurrent callers sharing one service must never lose a write or mint
//! the same identity twice.

#[cfg(test)]
mod tests {
    use barter_ledger::test_utils::{sample_invoice, test_service};
    use barter_ledger::{Attributes, BarterLedgerApi, ErrorKind, LedgerConfig};
    use parking_lot::Mutex;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_concurrent_opens_keep_every_trade() {
        let (ledger, _) = test_service(LedgerConfig::default()).unwrap();
        let ledger = Arc::new(ledger);

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    for _ in 0..25 {
                        ledger
                            .open_trade(
                                &format!("trader-{worker}"),
                                Attributes::new("red", 16),
                                vec![Attributes::new("blue", 16)],
                            )
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // The clock never moved, yet every identity is distinct.
        let book = ledger.open_trades().unwrap();
        assert_eq!(book.len(), 200);
        let ids: HashSet<_> = book.iter().map(|t| t.timestamp).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_concurrent_creates_of_one_key_admit_one() {
        let (ledger, _) = test_service(LedgerConfig::default()).unwrap();
        let ledger = Arc::new(ledger);
        let winners = Arc::new(Mutex::new(Vec::new()));

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let ledger = Arc::clone(&ledger);
                let winners = Arc::clone(&winners);
                thread::spawn(move || {
                    let owner = format!("trader-{worker}");
                    match ledger.create_invoice(sample_invoice("SHARED", &owner, "steel", 1)) {
                        Ok(_) => winners.lock().push(owner),
                        Err(e) => assert_eq!(e.kind(), ErrorKind::AlreadyExists),
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let winners = winners.lock();
        assert_eq!(winners.len(), 1);
        assert_eq!(ledger.list_invoice_keys().unwrap(), vec!["SHARED"]);
        assert_eq!(ledger.get_invoice("SHARED").unwrap().owner, winners[0]);
    }
}
