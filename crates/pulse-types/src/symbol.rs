//! Type-safe wrapper for tracked asset symbols.
//!
//! A [`Symbol`] is the short ticker identifying a tracked chain (`SOL`,
//! `DOT`, ...). Wrapping it prevents accidental mixing of symbols with
//! other strings at API boundaries, and gives the cache document a
//! stable, ordered map key.

use serde::{Deserialize, Serialize};

/// Ticker symbol of a tracked asset.
///
/// Symbols are stored uppercase exactly as they appear in the store's
/// `chain` column. Ordering is lexicographic, which keeps per-symbol
/// maps in a deterministic serialization order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol from a ticker string.
    pub fn new(ticker: impl Into<String>) -> Self {
        Self(ticker.into())
    }

    /// Return the ticker as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the symbol and return the inner ticker string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for Symbol {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(ticker: &str) -> Self {
        Self(ticker.to_owned())
    }
}

impl From<String> for Symbol {
    fn from(ticker: String) -> Self {
        Self(ticker)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn symbol_serializes_as_bare_string() {
        let symbol = Symbol::from("SOL");
        let json = serde_json::to_string(&symbol).unwrap();
        assert_eq!(json, "\"SOL\"");
    }

    #[test]
    fn symbol_orders_lexicographically() {
        assert!(Symbol::from("DOT") < Symbol::from("SOL"));
    }
}
