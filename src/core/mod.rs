//! Core engine types: configuration, RNG, errors.
//!
//! This module contains the building blocks shared by the deck and the
//! session. Games are tuned via `GameConfig` rather than by modifying the core.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{GameConfig, DEFAULT_COLUMNS, DEFAULT_RESOLUTION_DELAY_MS, DEFAULT_ROWS};
pub use error::{ConfigError, GameError, Result};
pub use rng::{GameRng, GameRngState};
