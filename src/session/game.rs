//! The game session: board, selection, counters, and match resolution.
//!
//! ## Tap rules
//!
//! A tap on an in-range tile is ignored (no state change, no event) when,
//! checked in order:
//! 1. the tile is already face-up (selected or matched),
//! 2. two tiles are already selected and waiting for resolution,
//! 3. the game is won.
//!
//! Otherwise the tile turns face-up, joins the selection, and the attempt
//! counter goes up by one. Attempts count tiles flipped, not pairs compared.
//!
//! ## Resolution
//!
//! Selecting the second tile of a pair schedules a one-shot timer for the
//! configured delay. When the host delivers it via `fire_timer`, the pair
//! is compared: a match stays face-up for good, a mismatch turns face-down.
//! `new_game`/`restart` cancel an outstanding timer, and a timer id the
//! session is not waiting for is reported as `TimerOutcome::Stale`.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, info, instrument, warn};

use super::events::{EventBus, SessionEvent, SubscriptionId};
use super::scheduler::{ManualScheduler, Scheduler, TimerId};
use super::state::{
    IgnoreReason, SessionPhase, SessionSnapshot, TapOutcome, TileFace, TimerOutcome,
};
use crate::core::{ConfigError, GameConfig, GameRng, GameRngState, Result};
use crate::deck::{Board, DeckGenerator, TilePosition};

/// A single-player memory game.
///
/// Generic over the timer backend so tests can drive resolution with a
/// virtual clock (`ManualScheduler`) and real hosts with
/// `runtime::TokioScheduler`.
#[derive(Debug)]
pub struct GameSession<S: Scheduler = ManualScheduler> {
    config: GameConfig,
    generator: DeckGenerator,
    rng: GameRng,
    scheduler: S,
    events: EventBus,

    phase: SessionPhase,
    board: Board,
    /// Face-up tiles: the current selection plus every matched tile.
    revealed: FxHashSet<TilePosition>,
    /// Permanently matched tiles.
    matched: FxHashSet<TilePosition>,
    selection: SmallVec<[TilePosition; 2]>,
    pending: Option<TimerId>,
    attempts: u32,
    matched_count: usize,
    final_attempts: Option<u32>,
    game_number: u32,
}

impl<S: Scheduler> GameSession<S> {
    /// Create an idle session. Call `new_game` to deal the first board.
    ///
    /// Seeds the RNG from `config.seed`, or from entropy when unset.
    pub fn new(config: GameConfig, scheduler: S) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self::with_rng(config, scheduler, rng)
    }

    /// Create an idle session with an injected RNG.
    pub fn with_rng(config: GameConfig, scheduler: S, rng: GameRng) -> Result<Self> {
        config.validate()?;
        let generator = DeckGenerator::new(&config.symbols, config.pair_count())?;

        Ok(Self {
            config,
            generator,
            rng,
            scheduler,
            events: EventBus::new(),
            phase: SessionPhase::Idle,
            board: Board::from_pairs_unchecked(Vec::new()),
            revealed: FxHashSet::default(),
            matched: FxHashSet::default(),
            selection: SmallVec::new(),
            pending: None,
            attempts: 0,
            matched_count: 0,
            final_attempts: None,
            game_number: 0,
        })
    }

    /// Create a session and deal the first board.
    pub fn start(config: GameConfig, scheduler: S) -> Result<Self> {
        let mut session = Self::new(config, scheduler)?;
        session.new_game();
        Ok(session)
    }

    /// Create a session already playing a fixed layout.
    ///
    /// Later games (`new_game`, `restart`) are dealt normally. The layout
    /// must fill the grid and use only symbols from the configured pool.
    pub fn with_board(config: GameConfig, scheduler: S, board: Board) -> Result<Self> {
        let mut session = Self::new(config, scheduler)?;
        if board.len() != session.config.tile_count() {
            return Err(ConfigError::BoardSizeMismatch {
                expected: session.config.tile_count(),
                actual: board.len(),
            }
            .into());
        }
        let pool = &session.config.symbols;
        if let Some(unknown) = board.symbols().iter().find(|s| !pool.contains(**s)) {
            return Err(ConfigError::UnknownSymbol {
                symbol: unknown.raw(),
                available: pool.len(),
            }
            .into());
        }
        session.begin(board);
        Ok(session)
    }

    // === Commands ===

    /// Deal a fresh board and reset every counter.
    ///
    /// Each deal draws from its own fork of the session RNG, so the n-th
    /// board depends only on the seed and n. Cancels a pending resolution
    /// from the previous game.
    #[instrument(skip(self), fields(game = self.game_number + 1))]
    pub fn new_game(&mut self) {
        let mut deal_rng = self.rng.fork();
        let board = self.generator.generate(&mut deal_rng);
        self.begin(board);
    }

    /// Abandon the current game (in any phase) and start a new one.
    #[instrument(skip(self), fields(game = self.game_number, phase = ?self.phase))]
    pub fn restart(&mut self) {
        self.cancel_pending();
        self.events.emit(&SessionEvent::Restarted);
        self.new_game();
    }

    /// Tap a tile.
    ///
    /// Returns `GameError::InvalidPosition` for positions off the board;
    /// every other tap either applies or is reported as ignored.
    #[instrument(skip(self), fields(game = self.game_number))]
    pub fn tap_tile(&mut self, position: TilePosition) -> Result<TapOutcome> {
        let symbol = self.board.symbol_at(position)?;

        if let Some(reason) = self.ignore_reason(position) {
            debug!(%position, %reason, "tap ignored");
            return Ok(TapOutcome::Ignored(reason));
        }

        self.selection.push(position);
        self.revealed.insert(position);
        self.attempts += 1;
        self.events.emit(&SessionEvent::TileRevealed { position, symbol });

        if self.selection.len() < 2 {
            return Ok(TapOutcome::Revealed);
        }

        let (first, second) = (self.selection[0], self.selection[1]);
        let timer = self.scheduler.schedule(self.config.resolution_delay());
        self.pending = Some(timer);
        self.phase = SessionPhase::Resolving;
        debug!(%first, %second, %timer, "pair selected, resolution scheduled");
        self.events.emit(&SessionEvent::PairPending { first, second });

        Ok(TapOutcome::PairSelected { timer })
    }

    /// Deliver an elapsed timer.
    ///
    /// Resolves the pending pair if `timer` is the one the session is
    /// waiting for; anything else is stale and ignored.
    #[instrument(skip(self), fields(game = self.game_number))]
    pub fn fire_timer(&mut self, timer: TimerId) -> TimerOutcome {
        if self.pending != Some(timer) || self.selection.len() != 2 {
            warn!(%timer, pending = ?self.pending, "ignoring stale timer");
            return TimerOutcome::Stale;
        }
        self.pending = None;

        let (first, second) = (self.selection[0], self.selection[1]);
        self.selection.clear();

        let is_match = self.board.symbols()[first.index()] == self.board.symbols()[second.index()];

        if is_match {
            self.matched.insert(first);
            self.matched.insert(second);
            self.matched_count += 2;
            info!(%first, %second, matched = self.matched_count, "pair matched");
            self.events.emit(&SessionEvent::Matched { first, second });

            if self.matched_count == self.board.len() {
                self.phase = SessionPhase::Won;
                self.final_attempts = Some(self.attempts);
                info!(attempts = self.attempts, "game won");
                self.events.emit(&SessionEvent::Won {
                    attempts: self.attempts,
                });
                return TimerOutcome::Matched { won: true };
            }

            self.phase = SessionPhase::Playing;
            TimerOutcome::Matched { won: false }
        } else {
            // Hide exactly the two selected tiles; matched tiles are untouched.
            self.revealed.remove(&first);
            self.revealed.remove(&second);
            self.phase = SessionPhase::Playing;
            info!(%first, %second, "pair mismatched");
            self.events.emit(&SessionEvent::Mismatched { first, second });
            TimerOutcome::Mismatched
        }
    }

    // === Events ===

    /// Register a state-changed listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&SessionEvent) + 'static,
    {
        self.events.subscribe(listener)
    }

    /// Remove a listener.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // === Queries ===

    /// Is the tile face-up (selected or matched)?
    pub fn is_face_up(&self, position: TilePosition) -> Result<bool> {
        self.board.check(position)?;
        Ok(self.revealed.contains(&position))
    }

    /// Is the tile permanently matched?
    pub fn is_matched(&self, position: TilePosition) -> Result<bool> {
        self.board.check(position)?;
        Ok(self.matched.contains(&position))
    }

    /// How the tile should be drawn.
    pub fn face(&self, position: TilePosition) -> Result<TileFace> {
        let symbol = self.board.symbol_at(position)?;
        Ok(if self.matched.contains(&position) {
            TileFace::Matched(symbol)
        } else if self.revealed.contains(&position) {
            TileFace::Revealed(symbol)
        } else {
            TileFace::Hidden
        })
    }

    /// Has every tile been matched?
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.phase == SessionPhase::Won
    }

    /// Tiles flipped this game.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Tiles permanently matched this game.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.matched_count
    }

    /// Attempts at the moment the game was won.
    #[must_use]
    pub fn final_attempts(&self) -> Option<u32> {
        self.final_attempts
    }

    /// Number of tiles on the current board (0 before the first deal).
    #[must_use]
    pub fn board_len(&self) -> usize {
        self.board.len()
    }

    /// The current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Tiles selected and awaiting comparison, in tap order.
    #[must_use]
    pub fn selection(&self) -> &[TilePosition] {
        &self.selection
    }

    /// Timer the session is waiting on, if a pair is pending.
    #[must_use]
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending
    }

    /// Sequence number of the current game (0 before the first deal).
    #[must_use]
    pub fn game_number(&self) -> u32 {
        self.game_number
    }

    /// The configuration this session was built from.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// RNG state, for replaying the next deal.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// The timer backend.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the timer backend.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Capture everything a view needs to draw.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let faces = self
            .board
            .positions()
            .map(|p| self.face(p).unwrap_or(TileFace::Hidden))
            .collect();

        SessionSnapshot {
            phase: self.phase,
            faces,
            selection: self.selection.to_vec(),
            attempts: self.attempts,
            matched_count: self.matched_count,
            final_attempts: self.final_attempts,
            game: self.game_number,
        }
    }

    // === Internals ===

    fn ignore_reason(&self, position: TilePosition) -> Option<IgnoreReason> {
        if self.revealed.contains(&position) {
            Some(IgnoreReason::AlreadyFaceUp)
        } else if self.selection.len() >= 2 {
            Some(IgnoreReason::ResolutionPending)
        } else if self.is_won() {
            Some(IgnoreReason::GameWon)
        } else {
            None
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(timer) = self.pending.take() {
            let cancelled = self.scheduler.cancel(timer);
            debug!(%timer, cancelled, "cancelled pending resolution");
        }
    }

    fn begin(&mut self, board: Board) {
        self.cancel_pending();

        self.board = board;
        self.revealed.clear();
        self.matched.clear();
        self.selection.clear();
        self.attempts = 0;
        self.matched_count = 0;
        self.final_attempts = None;
        self.game_number += 1;
        self.phase = SessionPhase::Playing;

        info!(game = self.game_number, tiles = self.board.len(), "new game");
        self.events.emit(&SessionEvent::NewGame {
            tiles: self.board.len(),
            game: self.game_number,
        });
    }
}

impl GameSession<ManualScheduler> {
    /// Advance the virtual clock and deliver every timer that came due.
    pub fn advance(&mut self, by: std::time::Duration) -> Vec<TimerOutcome> {
        let due = self.scheduler.advance(by);
        due.into_iter().map(|timer| self.fire_timer(timer)).collect()
    }
}

impl<S: Scheduler> Drop for GameSession<S> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
