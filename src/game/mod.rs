//! Game bookkeeping: manager, games, players, and redraw listeners.
//!
//! The [`GameManager`] owns the registry of game ids for one context;
//! [`Game`] and [`Player`] are cheap handles that read and write through
//! the context's store. Every mutation notifies the game's attached
//! [`RedrawListener`]s after the write has committed.

pub mod game;
pub mod listener;
pub mod manager;
pub mod player;

pub use game::Game;
pub use listener::{RedrawListener, SubscriptionId};
pub use manager::GameManager;
pub use player::Player;
