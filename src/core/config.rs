//! Game configuration.
//!
//! A `GameConfig` fixes the board dimensions, the symbol pool, the
//! resolution delay and (optionally) the RNG seed. Configs are plain data:
//! build them in code with the builder methods or load them from TOML.
//!
//! ```
//! use memory_match::core::GameConfig;
//!
//! let config = GameConfig::from_toml_str(
//!     r#"
//!     rows = 2
//!     columns = 4
//!     resolution_delay_ms = 250
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.tile_count(), 8);
//! assert_eq!(config.pair_count(), 4);
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::deck::SymbolPool;

/// Reference board: 4 rows of 3 tiles.
pub const DEFAULT_ROWS: usize = 4;
/// Reference board: 4 rows of 3 tiles.
pub const DEFAULT_COLUMNS: usize = 3;
/// Time both tiles of a pair stay face-up before the outcome applies.
pub const DEFAULT_RESOLUTION_DELAY_MS: u64 = 1000;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid rows.
    pub rows: usize,

    /// Grid columns.
    pub columns: usize,

    /// Symbols available for dealing. Must cover `pair_count()`.
    pub symbols: SymbolPool,

    /// Delay between selecting the second tile of a pair and resolving it.
    pub resolution_delay_ms: u64,

    /// Fixed seed for reproducible deals. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            symbols: SymbolPool::default(),
            resolution_delay_ms: DEFAULT_RESOLUTION_DELAY_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// The reference configuration (4x3 grid, six shapes, 1 s delay).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML. Missing keys take their defaults.
    ///
    /// Only parses; call `validate` (or build a session) to check it.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Set the grid dimensions.
    #[must_use]
    pub fn with_grid(mut self, rows: usize, columns: usize) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    /// Set the symbol pool.
    #[must_use]
    pub fn with_symbols(mut self, symbols: SymbolPool) -> Self {
        self.symbols = symbols;
        self
    }

    /// Set the resolution delay.
    #[must_use]
    pub fn with_resolution_delay(mut self, delay: Duration) -> Self {
        self.resolution_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Total tiles on the board.
    ///
    /// Saturates for grids too large to count; `validate` rejects those.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    /// Pairs on the board.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.tile_count() / 2
    }

    /// Resolution delay as a `Duration`.
    #[must_use]
    pub fn resolution_delay(&self) -> Duration {
        Duration::from_millis(self.resolution_delay_ms)
    }

    /// Check the config can produce a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                columns: self.columns,
            });
        }

        let tiles = self
            .rows
            .checked_mul(self.columns)
            .ok_or(ConfigError::GridTooLarge {
                rows: self.rows,
                columns: self.columns,
            })?;
        if tiles % 2 != 0 {
            return Err(ConfigError::OddTileCount { tiles });
        }

        let pairs = tiles / 2;
        if pairs > self.symbols.len() {
            return Err(ConfigError::NotEnoughSymbols {
                pairs,
                available: self.symbols.len(),
            });
        }

        Ok(())
    }
}
