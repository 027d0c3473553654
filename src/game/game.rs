//! One scoreboard: ordered players and a rectangular score table.
//!
//! A `Game` is a handle over the persisted state of one scoreboard plus its
//! own redraw-listener table. All reads go through the store, so handles
//! minted at different times observe the same data.
//!
//! ## Score table invariant
//!
//! Row `i` holds the `i`-th score entered for every player, so all players
//! carry equal-length score sequences. Row operations validate the incoming
//! line length before touching the store, and commit the per-player writes
//! as one atomic batch.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::{id, GameId, GameMode, PlayerId, Result, ScoreboardError};
use crate::store::{codec, keys, KvStore, WriteOp};

use super::listener::{ListenerTable, RedrawListener, SubscriptionId};
use super::player::Player;

/// Handle over one scoreboard.
///
/// Identity is by id only: two handles with the same id denote the same
/// game, independent of loaded field values or listener tables.
pub struct Game {
    store: Arc<dyn KvStore>,
    id: GameId,
    listeners: ListenerTable,
}

impl Game {
    pub(crate) fn new(store: Arc<dyn KvStore>, id: GameId) -> Self {
        Self {
            store,
            id,
            listeners: ListenerTable::default(),
        }
    }

    /// This game's id, unique within the owning context.
    #[must_use]
    pub fn id(&self) -> GameId {
        self.id
    }

    // === Name and mode ===

    /// The game's display name. Not required to be unique.
    pub fn name(&self) -> Result<String> {
        codec::decode_or_default(self.store.get(&keys::game_name(self.id)))
    }

    /// Rename the game and notify listeners.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.store
            .put(&keys::game_name(self.id), codec::encode(&name)?);
        self.notify_listeners();
        Ok(())
    }

    /// The game's mode. Data written before modes were persisted reads as
    /// [`GameMode::HighScore`].
    pub fn mode(&self) -> Result<GameMode> {
        codec::decode_or_default(self.store.get(&keys::game_mode(self.id)))
    }

    /// Switch between high-score and low-score ranking; notifies listeners.
    pub fn set_mode(&mut self, mode: GameMode) -> Result<()> {
        self.store
            .put(&keys::game_mode(self.id), codec::encode(&mode)?);
        self.notify_listeners();
        Ok(())
    }

    // === Players ===

    /// All players of this game, in stored (insertion) order.
    pub fn players(&self) -> Result<Vec<Player>> {
        Ok(self
            .player_ids()?
            .into_iter()
            .map(|pid| Player::new(Arc::clone(&self.store), self.id, pid))
            .collect())
    }

    /// Look up one player by id.
    ///
    /// Fails with [`ScoreboardError::PlayerNotFound`] when the id is not in
    /// the game's player list.
    pub fn player(&self, id: PlayerId) -> Result<Player> {
        if !self.player_ids()?.contains(&id) {
            return Err(ScoreboardError::PlayerNotFound(id));
        }
        Ok(Player::new(Arc::clone(&self.store), self.id, id))
    }

    /// Create a new player with the next free id.
    ///
    /// The player's score sequence is initialized with one zero per
    /// existing score row, keeping the table rectangular. Notifies
    /// listeners.
    pub fn create_player(&mut self, name: impl Into<String>) -> Result<Player> {
        let name = name.into();
        let mut ids = self.player_ids()?;
        let pid = PlayerId::new(id::next_id(&raw_ids(&ids)));
        let padding = vec![0i64; self.score_count()?];
        ids.push(pid);

        self.store.apply(vec![
            WriteOp::Put {
                key: keys::player_name(self.id, pid),
                value: codec::encode(&name)?,
            },
            WriteOp::Put {
                key: keys::player_scores(self.id, pid),
                value: codec::encode(&padding)?,
            },
            WriteOp::Put {
                key: keys::player_ids(self.id),
                value: codec::encode(&ids)?,
            },
        ]);
        debug!(game = %self.id, player = %pid, %name, "created player");

        self.notify_listeners();
        Ok(Player::new(Arc::clone(&self.store), self.id, pid))
    }

    /// Delete a player, erasing its name and scores.
    ///
    /// Returns `false` (without error or notification) when the id was not
    /// part of the game.
    pub fn delete_player(&mut self, id: PlayerId) -> Result<bool> {
        let mut ids = self.player_ids()?;
        let before = ids.len();
        ids.retain(|pid| *pid != id);
        if ids.len() == before {
            return Ok(false);
        }

        self.store.apply(vec![
            WriteOp::Remove {
                key: keys::player_name(self.id, id),
            },
            WriteOp::Remove {
                key: keys::player_scores(self.id, id),
            },
            WriteOp::Put {
                key: keys::player_ids(self.id),
                value: codec::encode(&ids)?,
            },
        ]);
        debug!(game = %self.id, player = %id, "deleted player");

        self.notify_listeners();
        Ok(true)
    }

    /// Rename a player and notify listeners.
    pub fn rename_player(&mut self, id: PlayerId, name: impl Into<String>) -> Result<()> {
        if !self.player_ids()?.contains(&id) {
            return Err(ScoreboardError::PlayerNotFound(id));
        }
        self.store
            .put(&keys::player_name(self.id, id), codec::encode(&name.into())?);
        self.notify_listeners();
        Ok(())
    }

    // === Score table ===

    /// Number of score rows currently on the board.
    ///
    /// Zero when the game has no players.
    pub fn score_count(&self) -> Result<usize> {
        match self.player_ids()?.first() {
            Some(&pid) => Ok(self.read_scores(pid)?.len()),
            None => Ok(0),
        }
    }

    /// Append one score row, one value per player in player order.
    ///
    /// Fails with [`ScoreboardError::ScoreLineSize`] before any write when
    /// the line length does not match the player count.
    pub fn add_score_line(&mut self, scores: &[i64]) -> Result<()> {
        let ids = self.player_ids()?;
        self.check_line_len(scores, ids.len())?;

        let mut batch = Vec::with_capacity(ids.len());
        for (&pid, &value) in ids.iter().zip(scores) {
            let mut seq = self.read_scores(pid)?;
            seq.push(value);
            batch.push(self.scores_op(pid, &seq)?);
        }
        self.store.apply(batch);
        trace!(game = %self.id, row = scores.len(), "appended score line");

        self.notify_listeners();
        Ok(())
    }

    /// Append a row of zeros, one per player.
    pub fn add_empty_score_line(&mut self) -> Result<()> {
        let zeros = vec![0i64; self.player_ids()?.len()];
        self.add_score_line(&zeros)
    }

    /// Overwrite row `index` with a new score line.
    ///
    /// Validates both the line length and the row index before any write.
    pub fn modify_score_line_at(&mut self, index: usize, scores: &[i64]) -> Result<()> {
        let ids = self.player_ids()?;
        self.check_line_len(scores, ids.len())?;

        let mut batch = Vec::with_capacity(ids.len());
        for (&pid, &value) in ids.iter().zip(scores) {
            let mut seq = self.read_scores(pid)?;
            if index >= seq.len() {
                return Err(ScoreboardError::RowOutOfRange {
                    index,
                    len: seq.len(),
                });
            }
            seq[index] = value;
            batch.push(self.scores_op(pid, &seq)?);
        }
        self.store.apply(batch);
        trace!(game = %self.id, index, "modified score line");

        self.notify_listeners();
        Ok(())
    }

    /// Remove row `index` from every player's sequence.
    pub fn remove_score_line_at(&mut self, index: usize) -> Result<()> {
        let len = self.score_count()?;
        if index >= len {
            return Err(ScoreboardError::RowOutOfRange { index, len });
        }

        let ids = self.player_ids()?;
        let mut batch = Vec::with_capacity(ids.len());
        for &pid in &ids {
            let mut seq = self.read_scores(pid)?;
            seq.remove(index);
            batch.push(self.scores_op(pid, &seq)?);
        }
        self.store.apply(batch);
        trace!(game = %self.id, index, "removed score line");

        self.notify_listeners();
        Ok(())
    }

    /// Read row `index`: one value per player, in player order.
    pub fn score_line_at(&self, index: usize) -> Result<Vec<i64>> {
        let len = self.score_count()?;
        if index >= len {
            return Err(ScoreboardError::RowOutOfRange { index, len });
        }

        self.player_ids()?
            .into_iter()
            .map(|pid| {
                let seq = self.read_scores(pid)?;
                seq.get(index)
                    .copied()
                    .ok_or(ScoreboardError::RowOutOfRange {
                        index,
                        len: seq.len(),
                    })
            })
            .collect()
    }

    // === Derived aggregates ===

    /// Players attaining the winning total.
    ///
    /// Under [`GameMode::HighScore`] that is the maximum total, under
    /// [`GameMode::LowScore`] the minimum. Ties include every player at the
    /// extreme; a game without players yields an empty set.
    pub fn winners(&self) -> Result<Vec<PlayerId>> {
        let pick_max = self.mode()? == GameMode::HighScore;
        self.at_extreme(pick_max)
    }

    /// Players attaining the losing total (the opposite extreme of
    /// [`Game::winners`]).
    pub fn losers(&self) -> Result<Vec<PlayerId>> {
        let pick_max = self.mode()? == GameMode::LowScore;
        self.at_extreme(pick_max)
    }

    /// All players with their totals, ordered best-first.
    ///
    /// Ties keep player (insertion) order.
    pub fn ranking(&self) -> Result<Vec<(PlayerId, i64)>> {
        let mut totals = self.totals()?;
        match self.mode()? {
            GameMode::HighScore => totals.sort_by_key(|(_, total)| std::cmp::Reverse(*total)),
            GameMode::LowScore => totals.sort_by_key(|(_, total)| *total),
        }
        Ok(totals)
    }

    // === Listeners ===

    /// Attach a redraw listener; it fires after every committed mutation.
    ///
    /// Listeners are invoked synchronously on the mutating thread, in
    /// attach order.
    pub fn subscribe(&mut self, listener: Box<dyn RedrawListener>) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    /// Detach a listener. Returns `false` if the subscription was already
    /// gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Number of currently attached listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify_listeners(&mut self) {
        // The table is moved out so listeners can borrow the game itself.
        let mut table = std::mem::take(&mut self.listeners);
        table.notify_all(self);
        self.listeners = table;
    }

    // === Internal helpers ===

    pub(crate) fn player_ids(&self) -> Result<Vec<PlayerId>> {
        codec::decode_or_default(self.store.get(&keys::player_ids(self.id)))
    }

    fn read_scores(&self, pid: PlayerId) -> Result<Vec<i64>> {
        codec::decode_or_default(self.store.get(&keys::player_scores(self.id, pid)))
    }

    /// Build the write that replaces a player's sequence as a unit.
    fn scores_op(&self, pid: PlayerId, seq: &[i64]) -> Result<WriteOp> {
        Ok(WriteOp::Put {
            key: keys::player_scores(self.id, pid),
            value: codec::encode(&seq)?,
        })
    }

    fn check_line_len(&self, scores: &[i64], players: usize) -> Result<()> {
        if scores.len() != players {
            return Err(ScoreboardError::ScoreLineSize {
                expected: players,
                actual: scores.len(),
            });
        }
        Ok(())
    }

    fn totals(&self) -> Result<Vec<(PlayerId, i64)>> {
        self.players()?
            .iter()
            .map(|player| Ok((player.id(), player.total_score()?)))
            .collect()
    }

    fn at_extreme(&self, pick_max: bool) -> Result<Vec<PlayerId>> {
        let totals = self.totals()?;
        let extreme = if pick_max {
            totals.iter().map(|(_, total)| *total).max()
        } else {
            totals.iter().map(|(_, total)| *total).min()
        };
        let Some(extreme) = extreme else {
            return Ok(Vec::new());
        };
        Ok(totals
            .into_iter()
            .filter(|(_, total)| *total == extreme)
            .map(|(pid, _)| pid)
            .collect())
    }

    /// All writes that erase this game: name, mode, player list, and every
    /// player's data. The manager appends the registry update and commits
    /// the whole cascade as one atomic batch.
    pub(crate) fn delete_batch(&self) -> Result<Vec<WriteOp>> {
        let mut batch = vec![
            WriteOp::Remove {
                key: keys::game_name(self.id),
            },
            WriteOp::Remove {
                key: keys::game_mode(self.id),
            },
            WriteOp::Remove {
                key: keys::player_ids(self.id),
            },
        ];
        for pid in self.player_ids()? {
            batch.push(WriteOp::Remove {
                key: keys::player_name(self.id, pid),
            });
            batch.push(WriteOp::Remove {
                key: keys::player_scores(self.id, pid),
            });
        }
        Ok(batch)
    }
}

fn raw_ids(ids: &[PlayerId]) -> Vec<u32> {
    ids.iter().map(|pid| pid.raw()).collect()
}

impl PartialEq for Game {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Game {}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("id", &self.id)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}
