//! Game session: the tap/resolve state machine and its collaborators.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use memory_match::core::GameConfig;
//! use memory_match::deck::TilePosition;
//! use memory_match::session::{GameSession, ManualScheduler, TapOutcome};
//!
//! let config = GameConfig::new().with_seed(42);
//! let mut session = GameSession::start(config, ManualScheduler::new()).unwrap();
//!
//! // Flip the partner of tile 0 so the pair is guaranteed to match.
//! let first = TilePosition::new(0);
//! let second = session.board().pair_of(first).unwrap();
//!
//! assert_eq!(session.tap_tile(first).unwrap(), TapOutcome::Revealed);
//! assert!(matches!(session.tap_tile(second).unwrap(), TapOutcome::PairSelected { .. }));
//!
//! session.advance(Duration::from_millis(1000));
//! assert_eq!(session.matched_count(), 2);
//! assert_eq!(session.attempts(), 2);
//! ```

mod events;
mod game;
mod scheduler;
mod state;

pub use events::{EventBus, SessionEvent, SubscriptionId};
pub use game::GameSession;
pub use scheduler::{ManualScheduler, Scheduler, TimerId};
pub use state::{
    IgnoreReason, SessionPhase, SessionSnapshot, TapOutcome, TileFace, TimerOutcome,
};
