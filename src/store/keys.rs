//! Key schema for the scoreboard store.
//!
//! Layout (one store per owning context):
//!
//! ```text
//! gameIDs                     -> Vec<GameId>, registry of games in use
//! {game}.gameName             -> String
//! {game}.gameMode             -> GameMode (absent in old data)
//! {game}.playerIDs            -> Vec<PlayerId>, display order
//! {game}.{player}.playerName  -> String
//! {game}.{player}.scores      -> Vec<i64>, one entry per score row
//! ```

use crate::core::{GameId, PlayerId};

/// Registry of all game ids in use.
pub const GAME_IDS: &str = "gameIDs";

/// Key holding a game's display name.
#[must_use]
pub fn game_name(game: GameId) -> String {
    format!("{}.gameName", game.raw())
}

/// Key holding a game's mode.
#[must_use]
pub fn game_mode(game: GameId) -> String {
    format!("{}.gameMode", game.raw())
}

/// Key holding a game's ordered player id list.
#[must_use]
pub fn player_ids(game: GameId) -> String {
    format!("{}.playerIDs", game.raw())
}

/// Key holding a player's display name.
#[must_use]
pub fn player_name(game: GameId, player: PlayerId) -> String {
    format!("{}.{}.playerName", game.raw(), player.raw())
}

/// Key holding a player's ordered score sequence.
#[must_use]
pub fn player_scores(game: GameId, player: PlayerId) -> String {
    format!("{}.{}.scores", game.raw(), player.raw())
}
