//! # Janitor and Matcher Properties
//!
//! Randomized ledgers (seeded, reproducible) checked against the properties
//! the order book must hold:
//!
//! - matcher existence: every stored invoice is found for its owner and attributes
//! - after a janitor pass every trade has options, and each option is held
//!   by the trade's requester
//! - a second janitor pass changes nothing

#[cfg(test)]
mod tests {
    use barter_ledger::test_utils::{sample_invoice, test_service, TestService};
    use barter_ledger::{
        find_match, prune_unsatisfiable, Attributes, BarterLedgerApi, LedgerConfig, OrderBook,
        DEFAULT_OPEN_TRADES_KEY,
    };
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    const TRADERS: &[&str] = &["alice", "bob", "carol", "dave"];
    const MATERIALS: &[&str] = &["red", "Blue", "GREEN", "gold"];

    fn random_attrs(rng: &mut StdRng) -> Attributes {
        let material = MATERIALS.choose(rng).copied().unwrap_or("red");
        // Mixed case on purpose: matching ignores it.
        let material = if rng.gen_bool(0.5) {
            material.to_uppercase()
        } else {
            material.to_lowercase()
        };
        Attributes::new(material, rng.gen_range(1..=3))
    }

    fn random_trader(rng: &mut StdRng) -> &'static str {
        TRADERS.choose(rng).copied().unwrap_or("alice")
    }

    /// A ledger with random invoices and random open trades, janitor disabled.
    fn random_ledger(seed: u64) -> TestService {
        let mut rng = StdRng::seed_from_u64(seed);
        let config = LedgerConfig {
            clean_after_mutation: false,
            ..LedgerConfig::default()
        };
        let (ledger, clock) = test_service(config).unwrap();

        for n in 0..rng.gen_range(0..20) {
            let attrs = random_attrs(&mut rng);
            let invoice =
                sample_invoice(&format!("INV-{n}"), random_trader(&mut rng), &attrs.material, attrs.quantity);
            ledger.create_invoice(invoice).unwrap();
        }
        for _ in 0..rng.gen_range(0..15) {
            let willing = (0..rng.gen_range(1..=4))
                .map(|_| random_attrs(&mut rng))
                .collect();
            ledger
                .open_trade(random_trader(&mut rng), random_attrs(&mut rng), willing)
                .unwrap();
            clock.advance(rng.gen_range(0..3));
        }
        ledger
    }

    #[test]
    fn test_matcher_finds_every_invoice() {
        for seed in 0..30 {
            let ledger = random_ledger(seed);
            for invoice in ledger.list_invoices().unwrap() {
                let found = ledger
                    .find_match(&invoice.owner.to_uppercase(), &invoice.attributes())
                    .unwrap()
                    .unwrap_or_else(|| panic!("seed {seed}: no match for {}", invoice.invoice_number));
                assert!(found.satisfies(&invoice.owner, &invoice.attributes()), "seed {seed}");
            }
        }
    }

    #[test]
    fn test_clean_book_restores_invariant() {
        for seed in 0..50 {
            let ledger = random_ledger(seed);
            let before = ledger.open_trades().unwrap();
            let report = ledger.clean_book().unwrap();
            let after = ledger.open_trades().unwrap();

            assert_eq!(report.trades_checked, before.len(), "seed {seed}");
            assert_eq!(before.len() - after.len(), report.trades_removed, "seed {seed}");
            for trade in &after {
                assert!(!trade.willing.is_empty(), "seed {seed}");
                for option in &trade.willing {
                    assert!(
                        ledger.find_match(&trade.requester, option).unwrap().is_some(),
                        "seed {seed}: {} cannot give {option}",
                        trade.requester
                    );
                }
            }
            // Survivors keep their relative order.
            let surviving: Vec<_> = before
                .iter()
                .filter(|t| after.iter().any(|a| a.timestamp == t.timestamp))
                .map(|t| t.timestamp)
                .collect();
            let kept: Vec<_> = after.iter().map(|t| t.timestamp).collect();
            assert_eq!(surviving, kept, "seed {seed}");
        }
    }

    #[test]
    fn test_clean_book_is_idempotent() {
        for seed in 0..50 {
            let ledger = random_ledger(seed);
            ledger.clean_book().unwrap();
            let snapshot = ledger.read_raw(DEFAULT_OPEN_TRADES_KEY).unwrap();

            let second = ledger.clean_book().unwrap();
            assert!(!second.changed(), "seed {seed}: {second:?}");
            assert_eq!(ledger.read_raw(DEFAULT_OPEN_TRADES_KEY).unwrap(), snapshot, "seed {seed}");
        }
    }

    #[test]
    fn test_service_pass_agrees_with_pure_pruning() {
        for seed in 0..30 {
            let ledger = random_ledger(seed);
            let invoices = ledger.list_invoices().unwrap();
            let mut expected = OrderBook::new();
            for trade in ledger.open_trades().unwrap() {
                expected.push(trade);
            }

            let pure = prune_unsatisfiable(&mut expected, &invoices);
            let service = ledger.clean_book().unwrap();
            assert_eq!(pure, service, "seed {seed}");
            assert_eq!(expected.open_trades, ledger.open_trades().unwrap(), "seed {seed}");

            for trade in &expected.open_trades {
                for option in &trade.willing {
                    assert!(find_match(&invoices, &trade.requester, option).is_some());
                }
            }
        }
    }
}
