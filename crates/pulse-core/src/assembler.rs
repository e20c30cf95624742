//! Pure projection of store-reader output into the cache document.
//!
//! The assembler has no side effects and no I/O: given the slices the
//! reader produced for the tracked symbols, it builds one
//! [`CacheDocument`]. An empty slice means "no data in the window" and
//! becomes a present-but-empty sequence -- every declared key is always
//! populated.

use pulse_types::{CacheDocument, CorrelationPoint, MoodPoint, PostRecord, PricePoint, Symbol, VolumePoint};

/// The reader output for a single tracked symbol.
#[derive(Debug, Clone, Default)]
pub struct SymbolSlice {
    /// Price observations, ascending by timestamp.
    pub prices: Vec<PricePoint>,
    /// Volume observations, ascending by timestamp.
    pub volumes: Vec<VolumePoint>,
    /// Mood observations, ascending by timestamp.
    pub moods: Vec<MoodPoint>,
}

/// Everything one refresh tick read from the store.
#[derive(Debug, Clone, Default)]
pub struct ReaderSlices {
    /// Per-symbol history slices, one entry per tracked symbol.
    pub symbols: Vec<(Symbol, SymbolSlice)>,
    /// Cross-asset correlation observations, ascending by timestamp.
    pub correlations: Vec<CorrelationPoint>,
    /// The most recent posted analysis, if any exists.
    pub latest_post: Option<PostRecord>,
}

/// Build a cache document from one tick's reader output.
///
/// Every symbol in `slices.symbols` gets a key in each per-symbol map,
/// even when its sequences are empty. `latest_analysis` is the post
/// content, or empty when no post exists.
pub fn assemble(slices: ReaderSlices) -> CacheDocument {
    let mut document = CacheDocument {
        correlations: slices.correlations,
        latest_analysis: slices
            .latest_post
            .map(|post| post.content)
            .unwrap_or_default(),
        ..CacheDocument::default()
    };

    for (symbol, slice) in slices.symbols {
        document
            .price_history
            .insert(symbol.clone(), slice.prices);
        document
            .volume_history
            .insert(symbol.clone(), slice.volumes);
        document.moods.insert(symbol, slice.moods);
    }

    document
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn every_tracked_symbol_key_is_present_even_when_empty() {
        let slices = ReaderSlices {
            symbols: vec![
                (Symbol::from("SOL"), SymbolSlice::default()),
                (Symbol::from("DOT"), SymbolSlice::default()),
            ],
            ..ReaderSlices::default()
        };

        let document = assemble(slices);

        for symbol in [Symbol::from("SOL"), Symbol::from("DOT")] {
            assert_eq!(document.price_history.get(&symbol), Some(&Vec::new()));
            assert_eq!(document.volume_history.get(&symbol), Some(&Vec::new()));
            assert_eq!(document.moods.get(&symbol), Some(&Vec::new()));
        }
        assert!(document.correlations.is_empty());
        assert_eq!(document.latest_analysis, "");
    }

    #[test]
    fn latest_analysis_is_the_post_content() {
        let slices = ReaderSlices {
            latest_post: Some(PostRecord {
                timestamp: Utc::now(),
                content: String::from("SOL looking strong into the weekend."),
                trigger_type: String::from("scheduled"),
            }),
            ..ReaderSlices::default()
        };

        let document = assemble(slices);
        assert_eq!(
            document.latest_analysis,
            "SOL looking strong into the weekend."
        );
    }

    #[test]
    fn slices_are_forwarded_unchanged() {
        let sol = Symbol::from("SOL");
        let prices = vec![
            PricePoint {
                timestamp: "2026-08-01T00:00:00Z".parse().unwrap(),
                price: 140.0,
            },
            PricePoint {
                timestamp: "2026-08-01T01:00:00Z".parse().unwrap(),
                price: 141.5,
            },
        ];
        let slices = ReaderSlices {
            symbols: vec![(
                sol.clone(),
                SymbolSlice {
                    prices: prices.clone(),
                    ..SymbolSlice::default()
                },
            )],
            ..ReaderSlices::default()
        };

        let document = assemble(slices);
        assert_eq!(document.price_history.get(&sol), Some(&prices));
    }
}
