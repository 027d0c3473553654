//! Game manager: the registry of games for one owning context.

use std::sync::Arc;

use tracing::debug;

use crate::core::{id, ContextId, GameId, GameMode, Result, ScoreboardError};
use crate::store::{codec, keys, KvStore, WriteOp};

use super::game::Game;

/// Registry of games for one owning context.
///
/// Holds the store for its context, the persisted list of game ids in use,
/// and the (in-memory) currently active game. Obtain one through
/// [`ManagerRegistry`](crate::registry::ManagerRegistry), or construct it
/// directly with a store for single-context use.
pub struct GameManager {
    context: ContextId,
    store: Arc<dyn KvStore>,
    active: Option<GameId>,
}

impl GameManager {
    /// Create a manager over the given context's store.
    ///
    /// No game is active initially.
    pub fn new(context: ContextId, store: Arc<dyn KvStore>) -> Self {
        Self {
            context,
            store,
            active: None,
        }
    }

    /// The owning context this manager is scoped to.
    #[must_use]
    pub fn context(&self) -> &ContextId {
        &self.context
    }

    /// All games, reconstructed from the stored id list.
    ///
    /// Order follows the stored list, which is insertion (creation) order
    /// since ids are only ever appended.
    pub fn list_games(&self) -> Result<Vec<Game>> {
        Ok(self
            .game_ids()?
            .into_iter()
            .map(|gid| Game::new(Arc::clone(&self.store), gid))
            .collect())
    }

    /// Look up one game by id.
    ///
    /// Fails with [`ScoreboardError::GameNotFound`] when the id is not
    /// registered, so callers never operate on a silently empty handle.
    pub fn game(&self, id: GameId) -> Result<Game> {
        if !self.game_ids()?.contains(&id) {
            return Err(ScoreboardError::GameNotFound(id));
        }
        Ok(Game::new(Arc::clone(&self.store), id))
    }

    /// Create a game with the given name and the next free id.
    ///
    /// The name does not need to be unique. The game is persisted
    /// immediately: name, default mode, and its id in the registry list,
    /// committed as one batch.
    pub fn create_game(&mut self, name: impl Into<String>) -> Result<Game> {
        let name = name.into();
        let mut ids = self.game_ids()?;
        let gid = GameId::new(id::next_id(&raw_ids(&ids)));
        ids.push(gid);

        self.store.apply(vec![
            WriteOp::Put {
                key: keys::game_name(gid),
                value: codec::encode(&name)?,
            },
            WriteOp::Put {
                key: keys::game_mode(gid),
                value: codec::encode(&GameMode::default())?,
            },
            WriteOp::Put {
                key: keys::GAME_IDS.to_owned(),
                value: codec::encode(&ids)?,
            },
        ]);
        debug!(context = %self.context, game = %gid, %name, "created game");

        Ok(Game::new(Arc::clone(&self.store), gid))
    }

    /// Delete a game, cascading into all of its players' data.
    ///
    /// Deactivates the game first if it is active. The whole cascade (name,
    /// mode, player list, every player's name and scores, and the registry
    /// update) commits as one atomic batch, so a crash cannot leave
    /// orphaned player records. Returns `false` when the game was not
    /// registered.
    pub fn delete_game(&mut self, game: &Game) -> Result<bool> {
        let mut ids = self.game_ids()?;
        let before = ids.len();
        ids.retain(|gid| *gid != game.id());
        if ids.len() == before {
            return Ok(false);
        }

        if self.is_active(game) {
            self.activate_game(None)?;
        }

        let mut batch = game.delete_batch()?;
        batch.push(WriteOp::Put {
            key: keys::GAME_IDS.to_owned(),
            value: codec::encode(&ids)?,
        });
        self.store.apply(batch);
        debug!(context = %self.context, game = %game.id(), "deleted game");

        Ok(true)
    }

    /// Activate a game by id, or pass `None` to clear the active game.
    ///
    /// At most one game is active per context. Activating the game that is
    /// already active is a no-op. Fails with
    /// [`ScoreboardError::GameNotFound`] for an unregistered id.
    pub fn activate_game(&mut self, id: Option<GameId>) -> Result<()> {
        if let Some(gid) = id {
            if !self.game_ids()?.contains(&gid) {
                return Err(ScoreboardError::GameNotFound(gid));
            }
        }
        if self.active == id {
            return Ok(());
        }
        self.active = id;
        debug!(context = %self.context, active = ?id, "switched active game");
        Ok(())
    }

    /// The id of the currently active game, if any.
    #[must_use]
    pub fn active_game(&self) -> Option<GameId> {
        self.active
    }

    /// Check whether the given game is the active one.
    #[must_use]
    pub fn is_active(&self, game: &Game) -> bool {
        self.active == Some(game.id())
    }

    /// Position of a game in [`GameManager::list_games`] order, or `None`
    /// if it is not registered.
    pub fn position_of(&self, game: &Game) -> Result<Option<usize>> {
        Ok(self.game_ids()?.iter().position(|gid| *gid == game.id()))
    }

    /// Ensure at least one game exists, then activate the first.
    ///
    /// Creates an unnamed game when the registry is empty; otherwise
    /// activates the first stored game. Returns the activated game.
    pub fn create_game_if_empty_and_activate_first(&mut self) -> Result<Game> {
        let game = match self.game_ids()?.first() {
            Some(&gid) => Game::new(Arc::clone(&self.store), gid),
            None => self.create_game("")?,
        };
        self.activate_game(Some(game.id()))?;
        Ok(game)
    }

    fn game_ids(&self) -> Result<Vec<GameId>> {
        codec::decode_or_default(self.store.get(keys::GAME_IDS))
    }
}

fn raw_ids(ids: &[GameId]) -> Vec<u32> {
    ids.iter().map(|gid| gid.raw()).collect()
}

impl std::fmt::Debug for GameManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameManager")
            .field("context", &self.context)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
