//! One-shot, cancellable timers.
//!
//! The session never sleeps. It asks a `Scheduler` for a timer and the host
//! calls `GameSession::fire_timer` with the timer's id when it elapses.
//! Restarting cancels the outstanding timer; ids are never reused, so a
//! timer that fires anyway is recognised as stale.
//!
//! ```
//! use std::time::Duration;
//! use memory_match::session::{ManualScheduler, Scheduler};
//!
//! let mut scheduler = ManualScheduler::new();
//! let timer = scheduler.schedule(Duration::from_millis(1000));
//!
//! assert!(scheduler.advance(Duration::from_millis(999)).is_empty());
//! assert_eq!(scheduler.advance(Duration::from_millis(1)), vec![timer]);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Handle for a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// "Invoke after `delay`, cancellable" primitive.
///
/// Implementations must hand out unique ids. A cancelled timer should not
/// be delivered; if one races past `cancel`, the session reports it as
/// `TimerOutcome::Stale`.
pub trait Scheduler {
    /// Schedule a one-shot timer.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancel a timer. Returns `false` if it already fired or was unknown.
    fn cancel(&mut self, timer: TimerId) -> bool;
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        (**self).schedule(delay)
    }

    fn cancel(&mut self, timer: TimerId) -> bool {
        (**self).cancel(timer)
    }
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    id: TimerId,
    deadline: Duration,
}

/// Virtual-clock scheduler.
///
/// Time only moves when `advance` is called, so tests never wait on the
/// wall clock. Step-driven hosts (a game loop with a frame delta) can use
/// it directly.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<Entry>,
}

impl ManualScheduler {
    /// Create a scheduler at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Is this timer still waiting?
    #[must_use]
    pub fn is_scheduled(&self, timer: TimerId) -> bool {
        self.pending.iter().any(|e| e.id == timer)
    }

    /// Deadline of a pending timer.
    #[must_use]
    pub fn deadline(&self, timer: TimerId) -> Option<Duration> {
        self.pending.iter().find(|e| e.id == timer).map(|e| e.deadline)
    }

    /// Move time forward and return the timers that came due, earliest first.
    ///
    /// Due timers are removed; the caller delivers them.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        self.now += by;
        let now = self.now;

        let mut due: Vec<Entry> = Vec::new();
        self.pending.retain(|entry| {
            if entry.deadline <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });

        due.sort_by_key(|e| (e.deadline, e.id));
        due.into_iter().map(|e| e.id).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Entry {
            id,
            deadline: self.now + delay,
        });
        id
    }

    fn cancel(&mut self, timer: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|e| e.id != timer);
        self.pending.len() != before
    }
}
