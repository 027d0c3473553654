//! Per-context manager registry.
//!
//! One [`GameManager`] exists per owning context. The application
//! constructs a `ManagerRegistry` once at startup with a
//! [`StoreProvider`] and passes it (by reference or behind an `Arc`) to
//! whatever needs managers; there is no process-wide static.
//!
//! The registry map is the only structure in this crate shared across
//! threads, guarded by one coarse mutex: concurrent [`instance`] calls for
//! the same context are serialized and return the identical manager.
//!
//! [`instance`]: ManagerRegistry::instance

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::core::{ContextId, GameId};
use crate::game::GameManager;
use crate::store::StoreProvider;

/// A manager shared between callers of the same context.
pub type SharedGameManager = Arc<Mutex<GameManager>>;

/// Registry handing out one [`GameManager`] per context.
pub struct ManagerRegistry {
    provider: Box<dyn StoreProvider>,
    managers: Mutex<FxHashMap<ContextId, SharedGameManager>>,
}

impl ManagerRegistry {
    /// Create a registry over the given store provider.
    pub fn new(provider: Box<dyn StoreProvider>) -> Self {
        Self {
            provider,
            managers: Mutex::new(FxHashMap::default()),
        }
    }

    /// Get the manager for `context`, creating it on first use.
    ///
    /// Calls for the same context always return the identical instance
    /// until [`ManagerRegistry::reset`] discards it.
    pub fn instance(&self, context: &ContextId) -> SharedGameManager {
        let mut managers = self.managers.lock();
        let manager = managers.entry(context.clone()).or_insert_with(|| {
            let store = self.provider.open(context);
            Arc::new(Mutex::new(GameManager::new(context.clone(), store)))
        });
        Arc::clone(manager)
    }

    /// Discard the manager for `context`.
    ///
    /// Returns the id of its active game, or `None` when no manager
    /// existed or no game was active. The next [`ManagerRegistry::instance`]
    /// call creates a fresh manager over the same persisted data.
    pub fn reset(&self, context: &ContextId) -> Option<GameId> {
        let manager = self.managers.lock().remove(context)?;
        let active = manager.lock().active_game();
        active
    }
}

impl std::fmt::Debug for ManagerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagerRegistry")
            .field("managers", &self.managers.lock().len())
            .finish_non_exhaustive()
    }
}
