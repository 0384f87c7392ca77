use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free list of commodity symbols the user follows.
///
/// Independent of trading: symbols are not validated against positions
/// or the catalog. Insertion order is preserved for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watchlist {
    symbols: Vec<String>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a watchlist from symbols, uppercasing and dropping duplicates.
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new();
        for symbol in symbols {
            list.add(symbol.into());
        }
        list
    }

    /// Add a symbol. No-op if already present.
    /// Returns `true` if the symbol was inserted.
    pub fn add(&mut self, symbol: impl Into<String>) -> bool {
        let upper = symbol.into().to_uppercase();
        if self.symbols.contains(&upper) {
            return false;
        }
        self.symbols.push(upper);
        true
    }

    /// Remove a symbol. No-op if absent.
    /// Returns `true` if the symbol was removed.
    pub fn remove(&mut self, symbol: &str) -> bool {
        let upper = symbol.to_uppercase();
        let before = self.symbols.len();
        self.symbols.retain(|s| s != &upper);
        self.symbols.len() != before
    }

    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(&symbol.to_uppercase())
    }

    /// Watched symbols in insertion order.
    #[must_use]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
