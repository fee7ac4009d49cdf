//! Property tests for deck generation and tap handling.

use std::collections::HashMap;
use std::time::Duration;

use proptest::prelude::*;

use memory_match::{
    DeckGenerator, GameConfig, GameRng, GameSession, ManualScheduler, SymbolPool, TapOutcome,
    TilePosition, TimerOutcome,
};

const DELAY: Duration = Duration::from_millis(1000);

// =============================================================================
// Strategies
// =============================================================================

/// One step a player (or the clock) can take.
#[derive(Clone, Debug)]
enum Step {
    Tap(usize),
    Wait,
    Restart,
}

fn step(tiles: usize) -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => (0..tiles).prop_map(Step::Tap),
        3 => Just(Step::Wait),
        1 => Just(Step::Restart),
    ]
}

// =============================================================================
// Deck Properties
// =============================================================================

proptest! {
    /// Test that every dealt board pairs each chosen symbol exactly twice.
    #[test]
    fn prop_boards_are_paired(seed in any::<u64>(), pool_size in 1usize..24, pairs_hint in 1usize..24) {
        let pairs = pairs_hint.min(pool_size);
        let pool = SymbolPool::new((0..pool_size).map(|i| format!("sym{i}"))).unwrap();
        let generator = DeckGenerator::new(&pool, pairs).unwrap();
        let board = generator.generate(&mut GameRng::new(seed));

        prop_assert_eq!(board.len() % 2, 0);
        prop_assert_eq!(board.len(), pairs * 2);

        let mut counts: HashMap<_, usize> = HashMap::new();
        for &symbol in board.symbols() {
            *counts.entry(symbol).or_default() += 1;
        }
        prop_assert_eq!(counts.len(), board.len() / 2);
        prop_assert!(counts.values().all(|&c| c == 2));
    }

    /// Test that asking for more pairs than symbols is rejected up front.
    #[test]
    fn prop_oversized_requests_rejected(pool_size in 0usize..12, extra in 1usize..6) {
        let pool = SymbolPool::new((0..pool_size).map(|i| format!("sym{i}"))).unwrap();
        prop_assert!(DeckGenerator::new(&pool, pool_size + extra).is_err());
    }
}

// =============================================================================
// Session Properties
// =============================================================================

proptest! {
    /// Test that counters and face-up sets stay consistent under random play.
    #[test]
    fn prop_session_invariants(seed in any::<u64>(), steps in prop::collection::vec(step(12), 0..80)) {
        let config = GameConfig::new().with_seed(seed);
        let mut session = GameSession::start(config, ManualScheduler::new()).unwrap();

        for step in steps {
            let attempts_before = session.attempts();
            let matched_before = session.matched_count();

            match step {
                Step::Tap(i) => {
                    let position = TilePosition::new(i);
                    let was_face_up = session.is_face_up(position).unwrap();
                    let selection_before = session.selection().to_vec();

                    let outcome = session.tap_tile(position).unwrap();
                    if was_face_up || selection_before.len() == 2 || session.is_won() {
                        prop_assert!(outcome.is_ignored());
                        prop_assert_eq!(session.attempts(), attempts_before);
                        prop_assert_eq!(session.selection(), &selection_before[..]);
                    } else {
                        prop_assert!(!outcome.is_ignored());
                        prop_assert_eq!(session.attempts(), attempts_before + 1);
                        prop_assert!(session.is_face_up(position).unwrap());
                    }
                }
                Step::Wait => {
                    for outcome in session.advance(DELAY) {
                        match outcome {
                            TimerOutcome::Matched { .. } => {
                                prop_assert_eq!(session.matched_count(), matched_before + 2);
                            }
                            TimerOutcome::Mismatched => {
                                prop_assert_eq!(session.matched_count(), matched_before);
                            }
                            TimerOutcome::Stale => prop_assert!(false, "stale timer from ManualScheduler"),
                        }
                        prop_assert_eq!(session.attempts(), attempts_before);
                        prop_assert!(session.selection().is_empty());
                    }
                }
                Step::Restart => {
                    session.restart();
                    prop_assert_eq!(session.attempts(), 0);
                    prop_assert_eq!(session.matched_count(), 0);
                    prop_assert_eq!(session.scheduler().pending(), 0);
                }
            }

            // Global invariants.
            prop_assert_eq!(session.matched_count() % 2, 0);
            prop_assert!(session.selection().len() <= 2);
            prop_assert_eq!(session.is_won(), session.matched_count() == session.board_len());

            let face_up = session
                .board()
                .positions()
                .filter(|&p| session.is_face_up(p).unwrap())
                .count();
            prop_assert_eq!(face_up, session.matched_count() + session.selection().len());

            for p in session.board().positions() {
                if session.is_matched(p).unwrap() {
                    prop_assert!(session.is_face_up(p).unwrap());
                    let partner = session.board().pair_of(p).unwrap();
                    prop_assert!(session.is_matched(partner).unwrap());
                }
            }

            if session.selection().len() == 2 {
                prop_assert!(session.pending_timer().is_some());
            } else {
                prop_assert!(session.pending_timer().is_none());
            }
        }
    }

    /// Test that tapping the same tile twice in a row never counts twice.
    #[test]
    fn prop_double_tap_counts_once(seed in any::<u64>(), i in 0usize..12) {
        let config = GameConfig::new().with_seed(seed);
        let mut session = GameSession::start(config, ManualScheduler::new()).unwrap();
        let position = TilePosition::new(i);

        prop_assert_eq!(session.tap_tile(position).unwrap(), TapOutcome::Revealed);
        prop_assert!(session.tap_tile(position).unwrap().is_ignored());
        prop_assert_eq!(session.attempts(), 1);
    }
}
