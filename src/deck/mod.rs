//! Symbols, boards, and the deck generator.
//!
//! The generator runs once per game (start and every restart) and produces
//! a `Board` where every symbol appears exactly twice.

mod board;
mod generator;
mod symbol;

pub use board::{Board, TilePosition};
pub use generator::DeckGenerator;
pub use symbol::{Symbol, SymbolPool, DEFAULT_SYMBOL_NAMES, MAX_SYMBOLS};
