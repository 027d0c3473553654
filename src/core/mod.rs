//! Core types: ids, game mode, and the crate error type.
//!
//! Everything here is storage-agnostic. Ids are opaque handles; the
//! collections that own them (the game registry, a game's player list)
//! decide allocation.

pub mod error;
pub mod id;
pub mod mode;

pub use error::{Result, ScoreboardError};
pub use id::{ContextId, GameId, PlayerId};
pub use mode::GameMode;
