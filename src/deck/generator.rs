//! Deck generation: pick symbols, duplicate, shuffle.

use tracing::instrument;

use super::{Board, Symbol, SymbolPool};
use crate::core::{ConfigError, GameRng};

/// Deals fresh boards from a symbol pool.
///
/// Construction checks that the pool can cover the requested pairs, so
/// `generate` itself cannot fail.
#[derive(Clone, Debug)]
pub struct DeckGenerator {
    symbols: Vec<Symbol>,
    pairs: usize,
}

impl DeckGenerator {
    /// Create a generator dealing `pairs` pairs from `pool`.
    pub fn new(pool: &SymbolPool, pairs: usize) -> Result<Self, ConfigError> {
        if pairs == 0 {
            return Err(ConfigError::NoPairs);
        }
        if pairs > pool.len() {
            return Err(ConfigError::NotEnoughSymbols {
                pairs,
                available: pool.len(),
            });
        }

        Ok(Self {
            symbols: pool.symbols().collect(),
            pairs,
        })
    }

    /// Number of pairs per board.
    #[must_use]
    pub fn pairs(&self) -> usize {
        self.pairs
    }

    /// Number of tiles per board.
    #[must_use]
    pub fn tiles(&self) -> usize {
        self.pairs * 2
    }

    /// Deal a new board.
    ///
    /// 1. Choose `pairs` distinct symbols uniformly without replacement.
    /// 2. Duplicate each chosen symbol.
    /// 3. Apply a uniform permutation to the whole sequence.
    #[instrument(skip(self, rng), fields(pairs = self.pairs))]
    pub fn generate(&self, rng: &mut GameRng) -> Board {
        let chosen = rng.sample_distinct(&self.symbols, self.pairs);

        let mut tiles: Vec<Symbol> = chosen
            .into_iter()
            .flat_map(|symbol| [symbol, symbol])
            .collect();

        rng.shuffle(&mut tiles);
        Board::from_pairs_unchecked(tiles)
    }
}
