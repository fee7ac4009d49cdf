//! Session phases, command outcomes, and the render snapshot.

use serde::{Deserialize, Serialize};

use super::TimerId;
use crate::deck::{Symbol, TilePosition};

/// Where the session is in its lifecycle.
///
/// ```text
/// Idle -> Playing -> Resolving -> Playing -> ... -> Won
///            ^                                      |
///            +------------- restart ----------------+
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Constructed, no board dealt yet.
    Idle,
    /// Accepting taps.
    Playing,
    /// Two tiles selected; waiting for the resolution timer.
    Resolving,
    /// Every tile matched.
    Won,
}

/// Why a tap changed nothing.
///
/// Checked in declaration order; the first that applies is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// The tile is already face-up (pending or matched).
    AlreadyFaceUp,
    /// A pair is waiting to be resolved.
    ResolutionPending,
    /// The game is already won.
    GameWon,
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnoreReason::AlreadyFaceUp => write!(f, "tile already face-up"),
            IgnoreReason::ResolutionPending => write!(f, "resolution pending"),
            IgnoreReason::GameWon => write!(f, "game already won"),
        }
    }
}

/// Result of `GameSession::tap_tile`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TapOutcome {
    /// No state changed.
    Ignored(IgnoreReason),
    /// First tile of a pair turned face-up.
    Revealed,
    /// Second tile of a pair turned face-up; `timer` will resolve it.
    PairSelected { timer: TimerId },
}

impl TapOutcome {
    /// Did the tap change state?
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, TapOutcome::Ignored(_))
    }
}

/// Result of `GameSession::fire_timer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerOutcome {
    /// The pair matched. `won` is set when it was the last pair.
    Matched { won: bool },
    /// The pair did not match and was hidden again.
    Mismatched,
    /// Not the session's pending timer (cancelled or from an earlier game).
    Stale,
}

/// How a single tile should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileFace {
    /// Face-down.
    Hidden,
    /// Face-up while selected.
    Revealed(Symbol),
    /// Permanently face-up.
    Matched(Symbol),
}

impl TileFace {
    /// The visible symbol, if face-up.
    #[must_use]
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            TileFace::Hidden => None,
            TileFace::Revealed(s) | TileFace::Matched(s) => Some(*s),
        }
    }

    /// Is the tile showing its symbol?
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        !matches!(self, TileFace::Hidden)
    }
}

/// Everything a view needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Current phase.
    pub phase: SessionPhase,
    /// One face per tile, in position order.
    pub faces: Vec<TileFace>,
    /// Tiles currently selected (0-2).
    pub selection: Vec<TilePosition>,
    /// Tiles flipped so far this game.
    pub attempts: u32,
    /// Tiles permanently matched.
    pub matched_count: usize,
    /// Attempts captured when the game was won.
    pub final_attempts: Option<u32>,
    /// Sequence number of the current game.
    pub game: u32,
}
