//! Error types.
//!
//! Two failure classes exist:
//! - `ConfigError`: the game cannot be built (fails fast at construction).
//! - `GameError`: a command or query was given input outside the board.
//!
//! Ignored taps (tile already open, resolution pending, game won) are not
//! errors; they are reported through `TapOutcome::Ignored`.

use thiserror::Error;

use crate::deck::TilePosition;

/// Crate-wide result alias.
pub type Result<T, E = GameError> = std::result::Result<T, E>;

/// Invalid game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Rows or columns is zero.
    #[error("grid must have at least one row and one column (got {rows}x{columns})")]
    EmptyGrid { rows: usize, columns: usize },

    /// Rows times columns does not fit in `usize`.
    #[error("grid of {rows}x{columns} is too large")]
    GridTooLarge { rows: usize, columns: usize },

    /// A board needs at least one pair.
    #[error("at least one pair is required")]
    NoPairs,

    /// Tiles can only be dealt in pairs.
    #[error("board size must be even (got {tiles} tiles)")]
    OddTileCount { tiles: usize },

    /// The symbol pool cannot cover the requested number of pairs.
    #[error("{pairs} pairs requested but only {available} distinct symbols available")]
    NotEnoughSymbols { pairs: usize, available: usize },

    /// A symbol name appears more than once in the pool.
    #[error("symbol {name:?} is listed more than once")]
    DuplicateSymbol { name: String },

    /// More names than `Symbol` ids.
    #[error("symbol pool holds at most {max} names (got more)")]
    TooManySymbols { max: usize },

    /// A fixed layout uses a symbol the pool has no name for.
    #[error("symbol {symbol} is not in the pool of {available} symbols")]
    UnknownSymbol { symbol: u16, available: usize },

    /// A fixed layout does not contain every symbol exactly twice.
    #[error("symbol {symbol} appears {count} times on the board (expected 2)")]
    UnpairedSymbol { symbol: u16, count: usize },

    /// A fixed layout does not fit the configured grid.
    #[error("board has {actual} tiles but the grid holds {expected}")]
    BoardSizeMismatch { expected: usize, actual: usize },

    /// Malformed TOML.
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Runtime error from a session command or query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Construction failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A tile position outside `[0, tiles)`.
    #[error("tile position {position} is out of range for a board of {tiles} tiles")]
    InvalidPosition { position: TilePosition, tiles: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::NotEnoughSymbols { pairs: 8, available: 6 };
        assert_eq!(
            err.to_string(),
            "8 pairs requested but only 6 distinct symbols available"
        );

        let err = ConfigError::OddTileCount { tiles: 9 };
        assert_eq!(err.to_string(), "board size must be even (got 9 tiles)");

        let err = ConfigError::UnknownSymbol { symbol: 50, available: 6 };
        assert_eq!(err.to_string(), "symbol 50 is not in the pool of 6 symbols");
    }

    #[test]
    fn test_game_error_from_config() {
        let err: GameError = ConfigError::OddTileCount { tiles: 3 }.into();
        assert!(matches!(err, GameError::Config(ConfigError::OddTileCount { tiles: 3 })));
        // Transparent: same message as the wrapped error.
        assert_eq!(err.to_string(), "board size must be even (got 3 tiles)");
    }

    #[test]
    fn test_invalid_position_message() {
        let err = GameError::InvalidPosition {
            position: TilePosition::new(12),
            tiles: 12,
        };
        assert_eq!(
            err.to_string(),
            "tile position 12 is out of range for a board of 12 tiles"
        );
    }
}
