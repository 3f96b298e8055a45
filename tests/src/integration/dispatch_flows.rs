//! # Dispatch Flows
//!
//! The ledger as a host sees it: a `LedgerNode` built from configuration,
//! driven with function names and positional string arguments.

#[cfg(test)]
mod tests {
    use barter_ledger::test_utils::sample_invoice_args;
    use barter_ledger::{ErrorKind, Invoice, LedgerError, OpenTrade};
    use ledger_node::{LedgerNode, NodeConfig};

    fn node(strict: bool) -> LedgerNode {
        let mut config = NodeConfig::default();
        config.ledger.strict_outcomes = strict;
        LedgerNode::open(&config).unwrap()
    }

    fn create(node: &LedgerNode, key: &str, owner: &str, material: &str, qty: i64) {
        node.invoke("create_invoice", &sample_invoice_args(key, owner, material, qty))
            .unwrap();
    }

    fn open(node: &LedgerNode, args: &[&str]) -> String {
        let trade: OpenTrade = serde_json::from_slice(&node.invoke("open_trade", args).unwrap()).unwrap();
        trade.timestamp.to_string()
    }

    fn trades(node: &LedgerNode) -> Vec<OpenTrade> {
        serde_json::from_slice(&node.invoke::<&str>("list_trades", &[]).unwrap()).unwrap()
    }

    fn owner_of(node: &LedgerNode, key: &str) -> String {
        let invoice: Invoice = serde_json::from_slice(&node.invoke("read", &[key]).unwrap()).unwrap();
        invoice.owner
    }

    #[test]
    fn test_opener_without_asset_permissive() {
        let node = node(false);
        create(&node, "A1", "alice", "red", 16);
        let id = open(&node, &["bob", "red", "16", "blue", "16"]);

        let response = node
            .invoke("perform_trade", &[id.as_str(), "bob", "A1", "bob", "blue", "16"])
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&response).unwrap();
        assert_eq!(value["outcome"], "no_suitable_asset");
        assert_eq!(trades(&node).len(), 1);
        assert_eq!(owner_of(&node, "A1"), "alice");
    }

    #[test]
    fn test_opener_without_asset_strict() {
        let node = node(true);
        create(&node, "A1", "alice", "red", 16);
        let id = open(&node, &["bob", "red", "16", "blue", "16"]);

        let err = node
            .invoke("perform_trade", &[id.as_str(), "bob", "A1", "bob", "blue", "16"])
            .unwrap_err();
        assert!(matches!(err, LedgerError::NoSuitableAsset { .. }));
        assert_eq!(trades(&node).len(), 1);
    }

    #[test]
    fn test_swap_through_dispatch() {
        let node = node(false);
        create(&node, "A1", "alice", "red", 16);
        create(&node, "A2", "bob", "blue", 16);
        let id = open(&node, &["bob", "red", "16", "blue", "16"]);

        node.invoke("perform_trade", &[id.as_str(), "alice", "A1", "bob", "blue", "16"])
            .unwrap();
        assert_eq!(owner_of(&node, "A1"), "bob");
        assert_eq!(owner_of(&node, "A2"), "alice");
        assert!(trades(&node).is_empty());
    }

    #[test]
    fn test_clean_leaves_only_satisfiable_order() {
        let node = node(false);
        create(&node, "A2", "bob", "blue", 16);
        let kept = open(&node, &["bob", "red", "16", "blue", "16"]);
        open(&node, &["bob", "red", "16", "gold", "1"]);

        node.invoke::<&str>("clean_trades", &[]).unwrap();
        let book = trades(&node);
        assert_eq!(book.len(), 1);
        assert_eq!(book[0].timestamp.to_string(), kept);
    }

    #[test]
    fn test_set_user_alias_and_validation_errors() {
        let node = node(false);
        create(&node, "A1", "alice", "red", 16);

        node.invoke("set_user", &["A1", "bob"]).unwrap();
        assert_eq!(owner_of(&node, "A1"), "bob");

        let err = node.invoke("set_user", &["A1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = node.invoke("open_trade", &["bob", "red", "many", "blue", "16"]).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument { position: 3, .. }));

        let err = node.invoke::<&str>("transfer_everything", &[]).unwrap_err();
        assert!(matches!(err, LedgerError::UnknownFunction(_)));
    }

    #[test]
    fn test_duplicate_create_through_dispatch() {
        let node = node(false);
        create(&node, "A1", "alice", "red", 16);
        let err = node
            .invoke("create_invoice", &sample_invoice_args("A1", "bob", "blue", 1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(owner_of(&node, "A1"), "alice");
    }
}
