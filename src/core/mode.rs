//! Game mode: which direction of the score scale wins.

use serde::{Deserialize, Serialize};

/// Determines whether the maximum or minimum total is the winning outcome.
///
/// Games created before the mode was persisted read back as `HighScore`,
/// which is also the default for new games.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Highest total wins (most card and dice games).
    #[default]
    HighScore,
    /// Lowest total wins (golf scoring).
    LowScore,
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::HighScore => write!(f, "high score"),
            GameMode::LowScore => write!(f, "low score"),
        }
    }
}
