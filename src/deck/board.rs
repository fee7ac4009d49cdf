//! Board layout: tile position -> symbol.
//!
//! A board is immutable for the lifetime of one game. Face-up/face-down
//! state lives in the session, not here.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::Symbol;
use crate::core::{ConfigError, GameError, Result};

/// Index of a tile on the board, `0..board.len()`.
///
/// Stable for the lifetime of one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePosition(pub usize);

impl TilePosition {
    /// Create a new tile position.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for TilePosition {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for TilePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered sequence of symbols where every symbol appears exactly twice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    symbols: Vec<Symbol>,
}

impl Board {
    /// Build a board from a fixed layout.
    ///
    /// Rejects layouts where any symbol does not appear exactly twice
    /// (which also rejects odd lengths).
    pub fn from_symbols(symbols: Vec<Symbol>) -> Result<Self, ConfigError> {
        if symbols.len() % 2 != 0 {
            return Err(ConfigError::OddTileCount {
                tiles: symbols.len(),
            });
        }

        let mut counts: FxHashMap<Symbol, usize> = FxHashMap::default();
        for &symbol in &symbols {
            *counts.entry(symbol).or_insert(0) += 1;
        }

        let mut unpaired: Vec<_> = counts.into_iter().filter(|&(_, c)| c != 2).collect();
        unpaired.sort();
        if let Some(&(symbol, count)) = unpaired.first() {
            return Err(ConfigError::UnpairedSymbol {
                symbol: symbol.raw(),
                count,
            });
        }

        Ok(Self { symbols })
    }

    /// Build without validation. Callers guarantee the pairing invariant.
    pub(crate) fn from_pairs_unchecked(symbols: Vec<Symbol>) -> Self {
        debug_assert!(symbols.len() % 2 == 0);
        Self { symbols }
    }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Is the board empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of pairs on the board.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.symbols.len() / 2
    }

    /// Check that a position is on the board.
    pub fn check(&self, position: TilePosition) -> Result<()> {
        if position.index() < self.symbols.len() {
            Ok(())
        } else {
            Err(GameError::InvalidPosition {
                position,
                tiles: self.symbols.len(),
            })
        }
    }

    /// Symbol at a position.
    pub fn symbol_at(&self, position: TilePosition) -> Result<Symbol> {
        self.check(position)?;
        Ok(self.symbols[position.index()])
    }

    /// The other position holding the same symbol.
    pub fn pair_of(&self, position: TilePosition) -> Result<TilePosition> {
        let symbol = self.symbol_at(position)?;
        let other = self
            .symbols
            .iter()
            .enumerate()
            .find(|&(i, &s)| i != position.index() && s == symbol)
            .map(|(i, _)| TilePosition(i));

        // Every symbol appears exactly twice, so the partner always exists.
        Ok(other.unwrap_or(position))
    }

    /// All positions, in order.
    pub fn positions(&self) -> impl Iterator<Item = TilePosition> {
        (0..self.symbols.len()).map(TilePosition)
    }

    /// The symbols in position order.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}
