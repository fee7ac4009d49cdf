//! Symbols and the symbol pool.
//!
//! A `Symbol` is the matching unit: two tiles match when their symbols are
//! equal. The engine never looks inside a symbol. The `SymbolPool` gives each
//! symbol a display name so the presentation layer can look up artwork.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// Largest pool a `Symbol` can index.
pub const MAX_SYMBOLS: usize = u16::MAX as usize + 1;

/// Opaque symbol identifier.
///
/// The raw value is the symbol's index in its `SymbolPool`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(pub u16);

impl Symbol {
    /// Create a new symbol.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// Shapes used by the reference game.
pub const DEFAULT_SYMBOL_NAMES: [&str; 6] =
    ["Circle", "Square", "Star", "Triangle", "Hexagon", "Pentagon"];

/// Ordered set of distinct, named symbols.
///
/// Serializes as a plain list of names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SymbolPool {
    names: Vec<String>,
}

impl SymbolPool {
    /// Build a pool from display names.
    ///
    /// Fails if a name repeats (two "distinct" symbols would look the same
    /// on screen) or if there are more than `MAX_SYMBOLS` names.
    pub fn new<I, N>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let mut collected: Vec<String> = Vec::new();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        for name in names {
            let name = name.into();
            if collected.len() == MAX_SYMBOLS {
                return Err(ConfigError::TooManySymbols { max: MAX_SYMBOLS });
            }
            if !seen.insert(name.clone()) {
                return Err(ConfigError::DuplicateSymbol { name });
            }
            collected.push(name);
        }
        Ok(Self { names: collected })
    }

    /// Number of distinct symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Is the pool empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All symbols in pool order.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..=u16::MAX).take(self.names.len()).map(Symbol)
    }

    /// Does this pool name the symbol?
    #[must_use]
    pub fn contains(&self, symbol: Symbol) -> bool {
        usize::from(symbol.0) < self.names.len()
    }

    /// Display name for a symbol.
    #[must_use]
    pub fn name(&self, symbol: Symbol) -> Option<&str> {
        self.names.get(usize::from(symbol.0)).map(String::as_str)
    }

    /// Look up a symbol by display name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Symbol> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(|i| u16::try_from(i).ok())
            .map(Symbol)
    }
}

impl Default for SymbolPool {
    fn default() -> Self {
        Self {
            names: DEFAULT_SYMBOL_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for SymbolPool {
    type Error = ConfigError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<SymbolPool> for Vec<String> {
    fn from(pool: SymbolPool) -> Self {
        pool.names
    }
}
