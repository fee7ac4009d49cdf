//! # memory-match
//!
//! Core of a single-screen memory-matching ("Concentration") game: a grid of
//! face-down tiles, each symbol appearing exactly twice, flipped two at a
//! time until every pair is found.
//!
//! ## Design Principles
//!
//! 1. **Pure state machine**: The session holds no rendering concerns.
//!    Views subscribe to `SessionEvent`s and read state through queries.
//!
//! 2. **Explicit timers**: The delay between flipping a pair and resolving it
//!    is a cancellable `Scheduler` timer, not an implicit callback. Restarts
//!    cancel it, and stale deliveries are recognised and dropped.
//!
//! 3. **Deterministic when asked**: Deals come from a seedable `GameRng`, so
//!    tests and replays see the same boards.
//!
//! ## Modules
//!
//! - `core`: Configuration, RNG, errors
//! - `deck`: Symbols, boards, deck generation
//! - `session`: The game state machine, scheduler trait, events
//! - `runtime`: Tokio-backed scheduler
//! - `view`: Grid and win-screen presentation binding

pub mod core;
pub mod deck;
pub mod runtime;
pub mod session;
pub mod view;

// Re-export commonly used types
pub use crate::core::{ConfigError, GameConfig, GameError, GameRng, GameRngState, Result};

pub use crate::deck::{Board, DeckGenerator, Symbol, SymbolPool, TilePosition};

pub use crate::session::{
    EventBus, GameSession, IgnoreReason, ManualScheduler, Scheduler, SessionEvent, SessionPhase,
    SessionSnapshot, SubscriptionId, TapOutcome, TileFace, TimerId, TimerOutcome,
};

pub use crate::runtime::{TimerReceiver, TokioScheduler};

pub use crate::view::{BoardView, WinSummary};
