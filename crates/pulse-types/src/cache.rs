//! The fixed-shape cache document served to dashboard clients.
//!
//! The document is the single process-wide state object. The refresh
//! task rebuilds it wholesale every tick and swaps it in atomically;
//! the HTTP snapshot endpoint and the WebSocket stream serve it
//! read-only. Every declared key is always present -- a slice with no
//! data in the window is an empty sequence, never a missing key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::market::{CorrelationPoint, MoodPoint, PricePoint, VolumePoint};
use crate::symbol::Symbol;

/// In-memory snapshot of recent market, mood, and correlation data.
///
/// All per-symbol sequences are sorted ascending by timestamp and hold
/// only rows inside the 24-hour history window of the refresh that
/// produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheDocument {
    /// Price history per tracked symbol.
    pub price_history: BTreeMap<Symbol, Vec<PricePoint>>,
    /// Volume history per tracked symbol.
    pub volume_history: BTreeMap<Symbol, Vec<VolumePoint>>,
    /// Mood history per tracked symbol.
    pub moods: BTreeMap<Symbol, Vec<MoodPoint>>,
    /// Cross-asset correlation history.
    pub correlations: Vec<CorrelationPoint>,
    /// Content of the most recent posted analysis, empty if none exists.
    pub latest_analysis: String,
}

impl CacheDocument {
    /// Create an empty document with every tracked symbol key present.
    ///
    /// This is the process-start value served until the first refresh
    /// completes.
    pub fn empty(symbols: &[Symbol]) -> Self {
        let mut document = Self::default();
        for symbol in symbols {
            document.price_history.insert(symbol.clone(), Vec::new());
            document.volume_history.insert(symbol.clone(), Vec::new());
            document.moods.insert(symbol.clone(), Vec::new());
        }
        document
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_has_all_top_level_keys() {
        let document = CacheDocument::empty(&[Symbol::from("SOL"), Symbol::from("DOT")]);
        let json = serde_json::to_value(&document).unwrap();

        for key in [
            "price_history",
            "volume_history",
            "moods",
            "correlations",
            "latest_analysis",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        assert!(json["price_history"].get("SOL").is_some());
        assert!(json["moods"].get("DOT").is_some());
        assert_eq!(json["latest_analysis"], "");
    }
}
