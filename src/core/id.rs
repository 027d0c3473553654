//! Typed identifiers for games, players, and owning contexts.
//!
//! ## Allocation
//!
//! `GameId` and `PlayerId` are positive integers handed out by their owning
//! collection as `max(existing) + 1`, starting at 1. Player ids are unique
//! within their game, not globally.
//!
//! ## Identity
//!
//! Two handles carrying the same id denote the same logical entity,
//! independent of any loaded field values.

use serde::{Deserialize, Serialize};

/// Unique identifier for a game within one owning context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameId(pub u32);

impl GameId {
    /// Create a new game ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Game({})", self.0)
    }
}

/// Unique identifier for a player within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

/// Opaque handle naming the owner of a store and its game manager.
///
/// One `GameManager` exists per context (see `ManagerRegistry`). The engine
/// never interprets the contents.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextId(pub String);

impl ContextId {
    /// Create a context ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw context name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContextId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Compute the next free id given the ids currently in use.
///
/// Returns 1 when the slice is empty. Ids of deleted entries are reused
/// only once no larger id remains live.
#[must_use]
pub(crate) fn next_id(in_use: &[u32]) -> u32 {
    in_use.iter().copied().max().map_or(1, |max| max + 1)
}
