//! Game and player integration tests.
//!
//! Covers player lifecycle, the rectangular score table invariant,
//! winners/losers under both modes, ranking, and redraw listeners.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use scoreboard::{
    ContextId, Game, GameManager, GameMode, MemoryStore, PlayerId, RedrawListener,
    ScoreboardError,
};

fn manager() -> GameManager {
    GameManager::new(ContextId::new("test"), Arc::new(MemoryStore::new()))
}

fn game_with_players(names: &[&str]) -> (GameManager, Game, Vec<PlayerId>) {
    let mut manager = manager();
    let mut game = manager.create_game("test game").unwrap();
    let players = names
        .iter()
        .map(|name| game.create_player(*name).unwrap().id())
        .collect();
    (manager, game, players)
}

// =============================================================================
// Player Lifecycle Tests
// =============================================================================

/// Players list in insertion order with their names.
#[test]
fn test_players_keep_insertion_order() {
    let (_m, game, ids) = game_with_players(&["alice", "bob", "carol"]);

    let players = game.players().unwrap();
    let listed: Vec<_> = players.iter().map(|p| p.id()).collect();
    assert_eq!(listed, ids);
    assert_eq!(players[1].name().unwrap(), "bob");
}

/// Player ids are scoped to their game and allocated max+1 from 1.
#[test]
fn test_player_ids_scoped_per_game() {
    let mut manager = manager();
    let mut g1 = manager.create_game("one").unwrap();
    let mut g2 = manager.create_game("two").unwrap();

    let p1 = g1.create_player("alice").unwrap();
    let p2 = g2.create_player("bob").unwrap();
    assert_eq!(p1.id(), PlayerId::new(1));
    assert_eq!(p2.id(), PlayerId::new(1));
    assert_ne!(p1, p2); // same id, different game
}

/// A new player joins with one zero per existing score row; nobody else's
/// sequence changes.
#[test]
fn test_create_player_pads_with_zeros() {
    let (_m, mut game, ids) = game_with_players(&["alice", "bob"]);
    game.add_score_line(&[5, 3]).unwrap();
    game.add_score_line(&[1, 9]).unwrap();

    let late = game.create_player("carol").unwrap();
    assert_eq!(late.scores().unwrap(), vec![0, 0]);
    assert_eq!(game.player(ids[0]).unwrap().scores().unwrap(), vec![5, 1]);
    assert_eq!(game.player(ids[1]).unwrap().scores().unwrap(), vec![3, 9]);
    assert_eq!(game.score_count().unwrap(), 2);
}

/// Deleting a player erases its data and shrinks score lines.
#[test]
fn test_delete_player() {
    let (_m, mut game, ids) = game_with_players(&["alice", "bob"]);
    game.add_score_line(&[5, 3]).unwrap();

    assert!(game.delete_player(ids[0]).unwrap());
    assert!(!game.delete_player(ids[0]).unwrap());

    let players = game.players().unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].id(), ids[1]);
    assert_eq!(game.score_line_at(0).unwrap(), vec![3]);
}

/// Player lookup is explicit about missing ids.
#[test]
fn test_player_lookup_not_found() {
    let (_m, game, _ids) = game_with_players(&["alice"]);
    let result = game.player(PlayerId::new(99));
    assert!(matches!(result, Err(ScoreboardError::PlayerNotFound(_))));
}

/// Renaming goes through the game so listeners fire.
#[test]
fn test_rename_player() {
    let (_m, mut game, ids) = game_with_players(&["alice"]);
    game.rename_player(ids[0], "alicia").unwrap();
    assert_eq!(game.player(ids[0]).unwrap().name().unwrap(), "alicia");

    let result = game.rename_player(PlayerId::new(99), "ghost");
    assert!(matches!(result, Err(ScoreboardError::PlayerNotFound(_))));
}

// =============================================================================
// Score Table Tests
// =============================================================================

/// A score line must carry exactly one value per player; a failed add
/// leaves every stored sequence untouched.
#[test]
fn test_score_line_size_is_validated_before_writing() {
    let (_m, mut game, ids) = game_with_players(&["alice", "bob"]);
    game.add_score_line(&[5, 3]).unwrap();

    let result = game.add_score_line(&[1, 2, 3]);
    assert!(matches!(
        result,
        Err(ScoreboardError::ScoreLineSize {
            expected: 2,
            actual: 3
        })
    ));

    assert_eq!(game.score_count().unwrap(), 1);
    assert_eq!(game.player(ids[0]).unwrap().scores().unwrap(), vec![5]);
    assert_eq!(game.player(ids[1]).unwrap().scores().unwrap(), vec![3]);
}

/// Modify overwrites exactly one row and round-trips through the store.
#[test]
fn test_modify_score_line_round_trip() {
    let (_m, mut game, _ids) = game_with_players(&["alice", "bob"]);
    game.add_score_line(&[5, 3]).unwrap();
    game.add_score_line(&[1, 9]).unwrap();

    game.modify_score_line_at(0, &[7, 8]).unwrap();
    assert_eq!(game.score_line_at(0).unwrap(), vec![7, 8]);
    // Unaffected rows are unchanged
    assert_eq!(game.score_line_at(1).unwrap(), vec![1, 9]);
}

/// Row operations reject indices beyond the table.
#[test]
fn test_row_index_out_of_range() {
    let (_m, mut game, _ids) = game_with_players(&["alice", "bob"]);
    game.add_score_line(&[5, 3]).unwrap();

    assert!(matches!(
        game.modify_score_line_at(1, &[0, 0]),
        Err(ScoreboardError::RowOutOfRange { index: 1, len: 1 })
    ));
    assert!(matches!(
        game.remove_score_line_at(5),
        Err(ScoreboardError::RowOutOfRange { index: 5, len: 1 })
    ));
    assert!(matches!(
        game.score_line_at(1),
        Err(ScoreboardError::RowOutOfRange { .. })
    ));
}

/// Removing a row shifts the rows below it up.
#[test]
fn test_remove_score_line() {
    let (_m, mut game, _ids) = game_with_players(&["alice", "bob"]);
    game.add_score_line(&[5, 3]).unwrap();
    game.add_score_line(&[1, 9]).unwrap();

    game.remove_score_line_at(0).unwrap();
    assert_eq!(game.score_count().unwrap(), 1);
    assert_eq!(game.score_line_at(0).unwrap(), vec![1, 9]);
}

/// An empty score line is one zero per player.
#[test]
fn test_add_empty_score_line() {
    let (_m, mut game, _ids) = game_with_players(&["alice", "bob"]);
    game.add_empty_score_line().unwrap();
    assert_eq!(game.score_line_at(0).unwrap(), vec![0, 0]);
}

/// A game without players has zero rows, and an empty line is accepted as
/// a no-op row.
#[test]
fn test_empty_game_score_table() {
    let mut manager = manager();
    let mut game = manager.create_game("empty").unwrap();

    assert_eq!(game.score_count().unwrap(), 0);
    game.add_score_line(&[]).unwrap();
    assert_eq!(game.score_count().unwrap(), 0);
}

// =============================================================================
// Winners / Losers / Ranking Tests
// =============================================================================

/// Worked example: totals [6, 12] make player 2 the sole winner under
/// high-score mode, and switching the mode swaps winners and losers.
#[test]
fn test_winners_and_losers_by_mode() {
    let (_m, mut game, ids) = game_with_players(&["alice", "bob"]);
    game.add_score_line(&[5, 3]).unwrap();
    game.add_score_line(&[1, 9]).unwrap();

    assert_eq!(game.player(ids[0]).unwrap().total_score().unwrap(), 6);
    assert_eq!(game.player(ids[1]).unwrap().total_score().unwrap(), 12);

    assert_eq!(game.winners().unwrap(), vec![ids[1]]);
    assert_eq!(game.losers().unwrap(), vec![ids[0]]);

    game.set_mode(GameMode::LowScore).unwrap();
    assert_eq!(game.winners().unwrap(), vec![ids[0]]);
    assert_eq!(game.losers().unwrap(), vec![ids[1]]);
}

/// All players sharing the extreme total are included.
#[test]
fn test_ties_include_all_extreme_players() {
    let (_m, mut game, ids) = game_with_players(&["alice", "bob", "carol"]);
    game.add_score_line(&[4, 4, 1]).unwrap();

    assert_eq!(game.winners().unwrap(), vec![ids[0], ids[1]]);
    assert_eq!(game.losers().unwrap(), vec![ids[2]]);
}

/// A game without players has neither winners nor losers.
#[test]
fn test_no_players_no_winners() {
    let mut manager = manager();
    let game = manager.create_game("empty").unwrap();
    assert!(game.winners().unwrap().is_empty());
    assert!(game.losers().unwrap().is_empty());
}

/// Ranking orders best-first and keeps insertion order on ties.
#[test]
fn test_ranking() {
    let (_m, mut game, ids) = game_with_players(&["alice", "bob", "carol"]);
    game.add_score_line(&[4, 9, 4]).unwrap();

    assert_eq!(
        game.ranking().unwrap(),
        vec![(ids[1], 9), (ids[0], 4), (ids[2], 4)]
    );

    game.set_mode(GameMode::LowScore).unwrap();
    assert_eq!(
        game.ranking().unwrap(),
        vec![(ids[0], 4), (ids[2], 4), (ids[1], 9)]
    );
}

/// Sub-totals are running sums through a row index.
#[test]
fn test_sub_total_at() {
    let (_m, mut game, ids) = game_with_players(&["alice"]);
    game.add_score_line(&[5]).unwrap();
    game.add_score_line(&[-2]).unwrap();
    game.add_score_line(&[4]).unwrap();

    let player = game.player(ids[0]).unwrap();
    assert_eq!(player.sub_total_at(0).unwrap(), 5);
    assert_eq!(player.sub_total_at(1).unwrap(), 3);
    assert_eq!(player.sub_total_at(2).unwrap(), 7);
    assert_eq!(player.total_score().unwrap(), 7);
}

// =============================================================================
// Deletion Cascade Tests
// =============================================================================

/// Deleting a game erases all player data: a recreated game that happens
/// to reuse the numeric id starts empty.
#[test]
fn test_delete_game_cascades_to_players() {
    let mut manager = manager();
    let mut game = manager.create_game("first").unwrap();
    game.create_player("alice").unwrap();
    game.create_player("bob").unwrap();
    game.add_score_line(&[5, 3]).unwrap();
    let old_id = game.id();

    manager.delete_game(&game).unwrap();

    // Registry is empty again, so the next game reuses id 1
    let recreated = manager.create_game("second").unwrap();
    assert_eq!(recreated.id(), old_id);
    assert!(recreated.players().unwrap().is_empty());
    assert_eq!(recreated.score_count().unwrap(), 0);
}

// =============================================================================
// Listener Tests
// =============================================================================

struct CountingListener(Arc<AtomicUsize>);

impl RedrawListener for CountingListener {
    fn on_change_applied(&mut self, _game: &Game) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

struct TaggingListener {
    tag: u8,
    log: Arc<Mutex<Vec<u8>>>,
}

impl RedrawListener for TaggingListener {
    fn on_change_applied(&mut self, _game: &Game) {
        self.log.lock().unwrap().push(self.tag);
    }
}

/// Every mutating operation notifies after the write committed.
#[test]
fn test_listener_fires_on_every_mutation() {
    let (_m, mut game, ids) = game_with_players(&["alice", "bob"]);
    let count = Arc::new(AtomicUsize::new(0));
    game.subscribe(Box::new(CountingListener(Arc::clone(&count))));

    game.set_name("renamed").unwrap();
    game.add_score_line(&[1, 2]).unwrap();
    game.modify_score_line_at(0, &[3, 4]).unwrap();
    game.remove_score_line_at(0).unwrap();
    game.rename_player(ids[0], "alicia").unwrap();
    game.delete_player(ids[1]).unwrap();
    game.set_mode(GameMode::LowScore).unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 7);
}

/// Failed operations do not notify.
#[test]
fn test_no_notification_on_rejected_write() {
    let (_m, mut game, _ids) = game_with_players(&["alice", "bob"]);
    let count = Arc::new(AtomicUsize::new(0));
    game.subscribe(Box::new(CountingListener(Arc::clone(&count))));

    assert!(game.add_score_line(&[1]).is_err());
    assert!(game.remove_score_line_at(0).is_err());
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

/// Listeners run in attach order; unsubscribing stops delivery.
#[test]
fn test_listener_order_and_unsubscribe() {
    let (_m, mut game, _ids) = game_with_players(&["alice"]);
    let log = Arc::new(Mutex::new(Vec::new()));

    let first = game.subscribe(Box::new(TaggingListener {
        tag: 1,
        log: Arc::clone(&log),
    }));
    game.subscribe(Box::new(TaggingListener {
        tag: 2,
        log: Arc::clone(&log),
    }));

    game.add_score_line(&[5]).unwrap();
    assert_eq!(*log.lock().unwrap(), vec![1, 2]);

    assert!(game.unsubscribe(first));
    assert!(!game.unsubscribe(first));
    assert_eq!(game.listener_count(), 1);

    game.add_score_line(&[6]).unwrap();
    assert_eq!(*log.lock().unwrap(), vec![1, 2, 2]);
}

/// A listener can read the game it observes during the callback.
#[test]
fn test_listener_reads_committed_state() {
    struct SnapshotListener {
        seen: Arc<Mutex<Vec<usize>>>,
    }

    impl RedrawListener for SnapshotListener {
        fn on_change_applied(&mut self, game: &Game) {
            self.seen.lock().unwrap().push(game.score_count().unwrap());
        }
    }

    let (_m, mut game, _ids) = game_with_players(&["alice"]);
    let seen = Arc::new(Mutex::new(Vec::new()));
    game.subscribe(Box::new(SnapshotListener {
        seen: Arc::clone(&seen),
    }));

    game.add_score_line(&[1]).unwrap();
    game.add_score_line(&[2]).unwrap();

    // The write is visible by the time the listener runs
    assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
}
