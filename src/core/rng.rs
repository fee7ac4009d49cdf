//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical deals
//! - **Fair**: Shuffles are Fisher-Yates, never comparator-based
//! - **Forkable**: Each deal draws from its own derived stream
//! - **Serializable**: O(1) state capture and restore
//!
//! ## Usage
//!
//! ```
//! use memory_match::core::GameRng;
//!
//! let mut rng1 = GameRng::new(42);
//! let mut rng2 = GameRng::new(42);
//!
//! let mut a = vec![1, 2, 3, 4, 5, 6];
//! let mut b = a.clone();
//! rng1.shuffle(&mut a);
//! rng2.shuffle(&mut b);
//! assert_eq!(a, b);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG used for dealing boards.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from the thread-local entropy source.
    ///
    /// The chosen seed is still recorded, so the deal can be replayed
    /// from `seed()`.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG into an independent stream.
    ///
    /// The n-th fork depends only on the seed and n, not on how much the
    /// parent stream has been consumed.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Number of forks taken so far.
    #[must_use]
    pub fn fork_count(&self) -> u64 {
        self.fork_counter
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place (uniform permutation).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Pick `amount` distinct elements uniformly, without replacement.
    ///
    /// Returns fewer than `amount` elements only when the slice is shorter.
    #[must_use]
    pub fn sample_distinct<T: Clone>(&mut self, slice: &[T], amount: usize) -> Vec<T> {
        let mut pool = slice.to_vec();
        let amount = amount.min(pool.len());
        let (chosen, _) = pool.partial_shuffle(&mut self.inner, amount);
        chosen.to_vec()
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG state for reproducing a deal.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Forks taken so far
    #[serde(default)]
    pub fork_counter: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_usize(0..1000), rng2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_from_entropy_records_seed() {
        let rng = GameRng::from_entropy();
        let replay = GameRng::new(rng.seed());
        assert_eq!(rng.state(), replay.state());
    }

    #[test]
    fn test_shuffle() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        // Should be same elements, different order (very likely)
        assert_eq!(data.len(), original.len());
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_sample_distinct() {
        let mut rng = GameRng::new(7);
        let items = vec!['a', 'b', 'c', 'd', 'e', 'f'];

        let mut picked = rng.sample_distinct(&items, 4);
        assert_eq!(picked.len(), 4);
        picked.sort();
        picked.dedup();
        assert_eq!(picked.len(), 4);
        assert!(picked.iter().all(|c| items.contains(c)));

        // Asking for more than available returns everything.
        let all = rng.sample_distinct(&items, 10);
        assert_eq!(all.len(), items.len());
    }

    #[test]
    fn test_sample_distinct_covers_pool() {
        // Every element must be reachable as a pick.
        let mut rng = GameRng::new(3);
        let items: Vec<u8> = (0..6).collect();
        let mut seen = [false; 6];

        for _ in 0..200 {
            for item in rng.sample_distinct(&items, 1) {
                seen[item as usize] = true;
            }
        }

        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_state_serialization() {
        let mut rng = GameRng::new(42);

        for _ in 0..100 {
            rng.gen_range_usize(0..1000);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.gen_range_usize(0..1000)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.gen_range_usize(0..1000)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_fork_deterministic() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let mut fork1 = rng1.fork();
        let mut fork2 = rng2.fork();
        assert_eq!(fork1.gen_range_usize(0..1000), fork2.gen_range_usize(0..1000));
        assert_eq!(rng1.fork_count(), 1);
    }

    #[test]
    fn test_forks_independent_of_parent_draws() {
        let mut fresh = GameRng::new(42);
        let mut used = GameRng::new(42);
        for _ in 0..50 {
            used.gen_range_usize(0..1000);
        }

        assert_eq!(fresh.fork().state(), used.fork().state());
        assert_ne!(fresh.fork().seed(), GameRng::new(42).fork().seed());
    }

    #[test]
    fn test_state_keeps_fork_counter() {
        let mut rng = GameRng::new(9);
        let _ = rng.fork();
        let _ = rng.fork();

        let mut restored = GameRng::from_state(&rng.state());
        assert_eq!(restored.fork().seed(), rng.fork().seed());
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
            fork_counter: 3,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }
}
