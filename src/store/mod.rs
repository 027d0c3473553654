//! Storage capability: key-value store trait, in-memory backend, codec,
//! and the key schema.
//!
//! The engine treats storage as a black box with three guarantees:
//! - writes are visible to the next in-process read,
//! - keys are strings,
//! - a [`KvStore::apply`] batch commits atomically.
//!
//! Cascading writes (deleting a game and all its players, writing one score
//! row across every player) are issued as a single batch so a crash cannot
//! leave the table half-written.

pub mod codec;
pub mod keys;
pub mod memory;

pub use memory::{MemoryStore, MemoryStoreProvider};

use std::sync::Arc;

use crate::core::ContextId;

/// One entry of an atomic write batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteOp {
    /// Insert or overwrite `key` with `value`.
    Put { key: String, value: Vec<u8> },
    /// Erase `key`. Removing an absent key is a no-op.
    Remove { key: String },
}

/// Key-value store capability injected into the engine.
///
/// Implementations use interior mutability; all methods take `&self` so
/// handles can share one store behind an `Arc`.
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Commit a batch of writes atomically.
    fn apply(&self, batch: Vec<WriteOp>);

    /// Insert or overwrite a single key.
    fn put(&self, key: &str, value: Vec<u8>) {
        self.apply(vec![WriteOp::Put {
            key: key.to_owned(),
            value,
        }]);
    }

    /// Erase a single key.
    fn remove(&self, key: &str) {
        self.apply(vec![WriteOp::Remove {
            key: key.to_owned(),
        }]);
    }
}

/// Opens one namespaced store per owning context.
///
/// Opening the same context twice must yield the same underlying data, so a
/// manager reset does not lose persisted games.
pub trait StoreProvider: Send + Sync {
    /// Open (or reopen) the store for `context`.
    fn open(&self, context: &ContextId) -> Arc<dyn KvStore>;
}
