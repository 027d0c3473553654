//! Player read handle.
//!
//! A `Player` is a cheap handle (store reference plus ids) over one
//! contestant's persisted name and score sequence. Mutations go through the
//! owning [`Game`](super::Game) so redraw listeners fire; see
//! `Game::rename_player` and the score line operations.

use std::sync::Arc;

use crate::core::{GameId, PlayerId, Result};
use crate::store::{codec, keys, KvStore};

/// One named contestant inside a game.
///
/// Identity is by id, scoped to the owning game: two handles with the same
/// `(game, id)` pair denote the same player regardless of loaded values.
pub struct Player {
    store: Arc<dyn KvStore>,
    game: GameId,
    id: PlayerId,
}

impl Player {
    pub(crate) fn new(store: Arc<dyn KvStore>, game: GameId, id: PlayerId) -> Self {
        Self { store, game, id }
    }

    /// This player's id, unique within its game.
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// The id of the game this player belongs to.
    #[must_use]
    pub fn game_id(&self) -> GameId {
        self.game
    }

    /// The player's display name. Missing data reads as the empty string.
    pub fn name(&self) -> Result<String> {
        codec::decode_or_default(self.store.get(&keys::player_name(self.game, self.id)))
    }

    /// The player's full score sequence, one entry per score row.
    pub fn scores(&self) -> Result<Vec<i64>> {
        codec::decode_or_default(self.store.get(&keys::player_scores(self.game, self.id)))
    }

    /// Sum of all scores.
    pub fn total_score(&self) -> Result<i64> {
        Ok(self.scores()?.iter().sum())
    }

    /// Running total through row `index` inclusive.
    ///
    /// Sums whatever rows exist up to `index`; an index past the end yields
    /// the same value as `total_score`.
    pub fn sub_total_at(&self, index: usize) -> Result<i64> {
        Ok(self.scores()?.iter().take(index + 1).sum())
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.game == other.game && self.id == other.id
    }
}

impl Eq for Player {}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("game", &self.game)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
