//! Fixtures shared by unit tests and the workspace test suite.

use crate::adapters::InMemoryStateStore;
use crate::domain::{Invoice, LedgerConfig, LedgerError, StoreError, Timestamp};
use crate::ports::{BarterLedgerApi, StateStore, TimeSource};
use crate::service::BarterLedgerService;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// First clock reading of [`ManualClock::default`].
pub const TEST_EPOCH_MS: Timestamp = 1_463_083_290_000;

/// An invoice with fixed payload fields and the given matchable data.
pub fn sample_invoice(key: &str, owner: &str, material: &str, quantity: i64) -> Invoice {
    Invoice {
        invoice_number: key.to_string(),
        vendor_id: "VENDOR-1".to_string(),
        customer_id: "CUSTOMER-1".to_string(),
        invoice_amount: 1250.50,
        currency: "USD".to_string(),
        material: material.to_string(),
        quantity,
        owner: owner.to_string(),
        payment_date: "2016-06-30".to_string(),
        status: "open".to_string(),
        new_payment_date: "2016-07-30".to_string(),
    }
}

/// Positional arguments of `create_invoice` for the same fixture.
pub fn sample_invoice_args(key: &str, owner: &str, material: &str, quantity: i64) -> Vec<String> {
    vec![
        "VENDOR-1".to_string(),
        "CUSTOMER-1".to_string(),
        key.to_string(),
        "1250.50".to_string(),
        "USD".to_string(),
        material.to_string(),
        quantity.to_string(),
        owner.to_string(),
        "2016-06-30".to_string(),
        "open".to_string(),
        "2016-07-30".to_string(),
    ]
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, now: Timestamp) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(TEST_EPOCH_MS)
    }
}

impl TimeSource for ManualClock {
    fn now_millis(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}

impl TimeSource for Arc<ManualClock> {
    fn now_millis(&self) -> Timestamp {
        self.as_ref().now_millis()
    }
}

/// State store that starts failing writes once its budget is spent.
///
/// Uses the default (sequential, non-atomic) `put_batch`, so a batch that
/// runs out of budget halfway leaves its first writes applied.
pub struct FaultyStateStore {
    inner: InMemoryStateStore,
    writes_left: AtomicUsize,
    fail_reads: AtomicBool,
}

impl FaultyStateStore {
    /// A store that accepts `budget` successful puts.
    pub fn with_write_budget(budget: usize) -> Self {
        Self {
            inner: InMemoryStateStore::new(),
            writes_left: AtomicUsize::new(budget),
            fail_reads: AtomicBool::new(false),
        }
    }

    pub fn set_write_budget(&self, budget: usize) {
        self.writes_left.store(budget, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

impl StateStore for FaultyStateStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Io {
                message: format!("injected read failure for {key}"),
            });
        }
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let spent = self
            .writes_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1));
        if spent.is_err() {
            return Err(StoreError::Io {
                message: format!("injected write failure for {key}"),
            });
        }
        self.inner.put(key, value)
    }
}

pub type TestService = BarterLedgerService<InMemoryStateStore, Arc<ManualClock>>;

/// Service over a fresh in-memory store with a manual clock, initialized.
pub fn test_service(config: LedgerConfig) -> Result<(TestService, Arc<ManualClock>), LedgerError> {
    let clock = Arc::new(ManualClock::default());
    let service = BarterLedgerService::with_clock(
        Arc::new(InMemoryStateStore::new()),
        Arc::clone(&clock),
        config,
    );
    service.initialize()?;
    Ok((service, clock))
}
