//! Tokio timer backend.
//!
//! Each scheduled timer is a spawned task that sleeps for the delay and then
//! sends its id on a channel. The host owns the receiving end and feeds ids
//! into `GameSession::fire_timer`, typically from a `tokio::select!` loop
//! alongside its input events. Cancelling aborts the task.
//!
//! The loop below runs until the UI closes its tap channel; the timer
//! channel stays open for as long as the session does.
//!
//! ```no_run
//! use memory_match::core::GameConfig;
//! use memory_match::deck::TilePosition;
//! use memory_match::runtime::{resolve_next, TokioScheduler};
//! use memory_match::session::GameSession;
//! use tokio::sync::mpsc;
//!
//! # async fn run(mut taps: mpsc::Receiver<TilePosition>) -> memory_match::core::Result<()> {
//! let (scheduler, mut timers) = TokioScheduler::new();
//! let mut session = GameSession::start(GameConfig::new(), scheduler)?;
//!
//! loop {
//!     tokio::select! {
//!         tap = taps.recv() => match tap {
//!             Some(position) => {
//!                 session.tap_tile(position)?;
//!             }
//!             None => break,
//!         },
//!         Some(outcome) = resolve_next(&mut session, &mut timers) => {
//!             println!("{outcome:?}");
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use rustc_hash::FxHashMap;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

use crate::session::{GameSession, Scheduler, TimerId, TimerOutcome};

/// Receiving end for elapsed timers.
pub type TimerReceiver = mpsc::UnboundedReceiver<TimerId>;

/// `Scheduler` backed by tokio tasks.
#[derive(Debug)]
pub struct TokioScheduler {
    handle: Handle,
    sender: mpsc::UnboundedSender<TimerId>,
    tasks: FxHashMap<TimerId, JoinHandle<()>>,
    next_id: u64,
}

impl TokioScheduler {
    /// Create a scheduler on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime, like `Handle::current`.
    pub fn new() -> (Self, TimerReceiver) {
        Self::with_handle(Handle::current())
    }

    /// Create a scheduler that spawns onto `handle`.
    pub fn with_handle(handle: Handle) -> (Self, TimerReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            handle,
            sender,
            tasks: FxHashMap::default(),
            next_id: 0,
        };
        (scheduler, receiver)
    }

    /// Number of timers that have not yet fired or been cancelled.
    #[must_use]
    pub fn active(&self) -> usize {
        self.tasks.values().filter(|t| !t.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.tasks.retain(|_, task| !task.is_finished());

        let id = TimerId(self.next_id);
        self.next_id += 1;

        let sender = self.sender.clone();
        let task = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            // The host may have dropped the receiver; nothing to deliver to.
            let _ = sender.send(id);
        });

        trace!(%id, ?delay, "timer scheduled");
        self.tasks.insert(id, task);
        id
    }

    fn cancel(&mut self, timer: TimerId) -> bool {
        match self.tasks.remove(&timer) {
            Some(task) => {
                let was_running = !task.is_finished();
                task.abort();
                trace!(%timer, was_running, "timer cancelled");
                was_running
            }
            None => false,
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

/// Wait for the next elapsed timer and deliver it to the session.
///
/// The sender lives in the `TokioScheduler`, so while that scheduler is
/// alive this waits until a timer elapses; it never returns `None` for a
/// session that owns the scheduler. Race it against input with
/// `tokio::select!` rather than looping on it alone.
pub async fn resolve_next<S: Scheduler>(
    session: &mut GameSession<S>,
    timers: &mut TimerReceiver,
) -> Option<TimerOutcome> {
    let timer = timers.recv().await?;
    Some(session.fire_timer(timer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::deck::{Board, Symbol, TilePosition};
    use crate::session::TapOutcome;

    fn board() -> Board {
        Board::from_symbols([0, 1, 0, 1].into_iter().map(Symbol).collect()).unwrap()
    }

    fn config() -> GameConfig {
        GameConfig::new().with_grid(2, 2).with_seed(5)
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_after_delay() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let start = tokio::time::Instant::now();

        let timer = scheduler.schedule(Duration::from_millis(1000));
        assert_eq!(rx.recv().await, Some(timer));
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_delivery() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let timer = scheduler.schedule(Duration::from_millis(100));
        assert_eq!(scheduler.active(), 1);

        assert!(scheduler.cancel(timer));
        assert!(!scheduler.cancel(timer));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(scheduler.active(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_resolves_through_tokio() {
        let (scheduler, mut rx) = TokioScheduler::new();
        let mut session = GameSession::with_board(config(), scheduler, board()).unwrap();

        session.tap_tile(TilePosition(0)).unwrap();
        let outcome = session.tap_tile(TilePosition(2)).unwrap();
        assert!(matches!(outcome, TapOutcome::PairSelected { .. }));

        let resolved = resolve_next(&mut session, &mut rx).await;
        assert_eq!(resolved, Some(TimerOutcome::Matched { won: false }));
        assert_eq!(session.matched_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_cancels_tokio_timer() {
        let (scheduler, mut rx) = TokioScheduler::new();
        let mut session = GameSession::with_board(config(), scheduler, board()).unwrap();

        session.tap_tile(TilePosition(0)).unwrap();
        session.tap_tile(TilePosition(1)).unwrap();
        session.restart();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(session.attempts(), 0);
        assert_eq!(session.scheduler().active(), 0);
    }
}
