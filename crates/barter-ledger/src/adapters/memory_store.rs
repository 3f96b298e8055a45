//! # In-Memory State Store
//!
//! `HashMap` behind a `parking_lot::RwLock`. Backs unit tests and the
//! node's default, non-persistent mode.

use crate::domain::StoreError;
use crate::ports::{StateStore, StateWrite};
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory implementation of [`StateStore`].
///
/// Batches are applied under a single write lock, so they are atomic with
/// respect to readers.
#[derive(Default)]
pub struct InMemoryStateStore {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys written so far.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl StateStore for InMemoryStateStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.data.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn put_batch(&self, writes: Vec<StateWrite>) -> Result<(), StoreError> {
        let mut data = self.data.write();
        for write in writes {
            data.insert(write.key, write.value);
        }
        Ok(())
    }
}
