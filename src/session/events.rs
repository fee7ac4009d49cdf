//! State-change notifications for the presentation layer.
//!
//! The session emits one event per observable mutation. A view subscribes
//! once and re-renders from the session's queries whenever an event arrives.

use serde::{Deserialize, Serialize};

use crate::deck::{Symbol, TilePosition};

/// Something observable happened in the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A fresh board was dealt.
    NewGame {
        /// Tiles on the new board.
        tiles: usize,
        /// Sequence number of this game (1 for the first).
        game: u32,
    },

    /// A tile turned face-up.
    TileRevealed {
        position: TilePosition,
        symbol: Symbol,
    },

    /// The second tile of a pair was selected; resolution is scheduled.
    PairPending {
        first: TilePosition,
        second: TilePosition,
    },

    /// The pending pair matched and stays face-up.
    Matched {
        first: TilePosition,
        second: TilePosition,
    },

    /// The pending pair did not match and turned face-down again.
    Mismatched {
        first: TilePosition,
        second: TilePosition,
    },

    /// Every tile is matched.
    Won {
        /// Attempts at the moment of winning.
        attempts: u32,
    },

    /// The session was restarted; a `NewGame` event follows.
    Restarted,
}

/// Subscription handle returned by `EventBus::subscribe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&SessionEvent)>;

/// Synchronous fan-out of session events.
///
/// Listeners run in subscription order, on the caller's thread, before the
/// emitting command returns.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&SessionEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver an event to every listener.
    pub fn emit(&mut self, event: &SessionEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
