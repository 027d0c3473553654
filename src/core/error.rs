//! Crate error type.
//!
//! Validation happens before any write: an operation that returns an error
//! has not mutated stored state.

use thiserror::Error;

use super::id::{GameId, PlayerId};

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ScoreboardError>;

/// Errors raised by scoreboard operations.
#[derive(Error, Debug)]
pub enum ScoreboardError {
    /// A score line did not carry exactly one value per player.
    #[error("score line carries {actual} values but the game has {expected} players")]
    ScoreLineSize { expected: usize, actual: usize },

    /// A row index beyond the current score table.
    #[error("row index {index} is out of range for a score table with {len} rows")]
    RowOutOfRange { index: usize, len: usize },

    /// The requested game id is not in the registry.
    #[error("no game with id {0} is registered")]
    GameNotFound(GameId),

    /// The requested player id is not part of the game.
    #[error("no player with id {0} in this game")]
    PlayerNotFound(PlayerId),

    /// A stored value could not be decoded.
    #[error("stored value could not be decoded: {0}")]
    Codec(#[from] bincode::Error),
}
