//! In-memory store backend.
//!
//! `MemoryStore` is the reference implementation of [`KvStore`]: a flat map
//! behind a mutex, with batch commits applied under one lock acquisition.
//! `MemoryStoreProvider` hands out one store per context and caches them,
//! so resetting a manager and reopening its context sees the same data.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::core::ContextId;

use super::{KvStore, StoreProvider, WriteOp};

/// Flat in-memory key-value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<FxHashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if the store holds no keys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().get(key).cloned()
    }

    fn apply(&self, batch: Vec<WriteOp>) {
        let mut entries = self.entries.lock();
        for op in batch {
            match op {
                WriteOp::Put { key, value } => {
                    entries.insert(key, value);
                }
                WriteOp::Remove { key } => {
                    entries.remove(&key);
                }
            }
        }
    }
}

/// Provider that keeps one [`MemoryStore`] per context.
#[derive(Debug, Default)]
pub struct MemoryStoreProvider {
    stores: Mutex<FxHashMap<ContextId, Arc<MemoryStore>>>,
}

impl MemoryStoreProvider {
    /// Create a provider with no stores yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreProvider for MemoryStoreProvider {
    fn open(&self, context: &ContextId) -> Arc<dyn KvStore> {
        let mut stores = self.stores.lock();
        let store = stores
            .entry(context.clone())
            .or_insert_with(|| Arc::new(MemoryStore::new()));
        Arc::clone(store) as Arc<dyn KvStore>
    }
}
