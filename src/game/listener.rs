//! Redraw listeners: observers notified after every committed mutation.
//!
//! Renderers subscribe on a [`Game`](super::Game) handle and are invoked
//! synchronously, on the mutating thread, in attach order. Subscribing
//! returns a [`SubscriptionId`] that revokes the subscription later.
//!
//! Reentrancy is settled by the borrow checker: callbacks receive `&Game`,
//! and attaching or detaching requires `&mut Game`, so a listener cannot
//! change the listener table from inside its own callback.

use super::Game;

/// Handle returned by `Game::subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Observer of game mutations.
///
/// Called after the write has been committed to the store, for every
/// mutating operation: renames, player add/remove, score line add/modify/
/// remove, mode changes.
pub trait RedrawListener: Send {
    /// The game this listener is attached to was changed.
    fn on_change_applied(&mut self, game: &Game);
}

/// Ordered table of subscribed listeners.
#[derive(Default)]
pub(crate) struct ListenerTable {
    listeners: Vec<(SubscriptionId, Box<dyn RedrawListener>)>,
    next_id: u64,
}

impl ListenerTable {
    pub(crate) fn subscribe(&mut self, listener: Box<dyn RedrawListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() < before
    }

    /// Invoke all listeners in attach order.
    pub(crate) fn notify_all(&mut self, game: &Game) {
        for (_, listener) in &mut self.listeners {
            listener.on_change_applied(game);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for ListenerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerTable")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
