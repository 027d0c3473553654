//! # scoreboard
//!
//! A storage-backed scoreboard engine: named games, named players, and a
//! rectangular table of per-round scores, persisted through an injected
//! key-value store.
//!
//! ## Design Principles
//!
//! 1. **Storage as a Capability**: The engine never owns a concrete backend.
//!    Callers inject anything implementing [`KvStore`]; an in-memory store
//!    ships for tests and single-process use.
//!
//! 2. **Explicit Registries**: There is no hidden global state. The
//!    application constructs a [`ManagerRegistry`] once at startup and
//!    passes it to whatever needs per-context game managers.
//!
//! 3. **Typed Encoding**: Stored values (names, id lists, score sequences)
//!    go through one bincode codec. No delimiter-joined strings, no
//!    hand-rolled parsing.
//!
//! 4. **Explicit Lookups**: Retrieving a game or player that does not exist
//!    is an error ([`ScoreboardError::GameNotFound`]), never a silently
//!    empty handle.
//!
//! ## Modules
//!
//! - `core`: Typed ids, game mode, the crate error type
//! - `store`: The `KvStore` capability, in-memory backend, codec, key schema
//! - `game`: `GameManager`, `Game`, `Player`, redraw listeners
//! - `registry`: Per-context manager registry
//! - `config`: Read-only application configuration

pub mod core;
pub mod store;
pub mod game;
pub mod registry;
pub mod config;

// Re-export commonly used types
pub use crate::core::{ContextId, GameId, GameMode, PlayerId, Result, ScoreboardError};

pub use crate::store::{KvStore, MemoryStore, MemoryStoreProvider, StoreProvider, WriteOp};

pub use crate::game::{Game, GameManager, Player, RedrawListener, SubscriptionId};

pub use crate::registry::{ManagerRegistry, SharedGameManager};

pub use crate::config::AppConfig;
