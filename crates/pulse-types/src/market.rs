//! History point records read from the market store.
//!
//! Each struct mirrors one projected row shape from the store's tables.
//! The store reader returns them ordered ascending by timestamp; the
//! cache assembler forwards them into the [`CacheDocument`] unchanged.
//!
//! [`CacheDocument`]: crate::cache::CacheDocument

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One price observation for a tracked symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// When the observation was recorded.
    pub timestamp: DateTime<Utc>,
    /// Price in USD at that time.
    pub price: f64,
}

/// One trading-volume observation for a tracked symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumePoint {
    /// When the observation was recorded.
    pub timestamp: DateTime<Utc>,
    /// 24h trading volume in USD at that time.
    pub volume: f64,
}

/// One sentiment observation for a tracked symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodPoint {
    /// When the mood was recorded.
    pub timestamp: DateTime<Utc>,
    /// Free-form mood label produced by the analysis bot.
    pub mood: String,
}

/// One cross-asset correlation observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPoint {
    /// When the correlation window was computed.
    pub timestamp: DateTime<Utc>,
    /// Pearson correlation of prices across the tracked pair.
    pub price_correlation: f64,
    /// Pearson correlation of volumes across the tracked pair.
    pub volume_correlation: f64,
    /// Ratio of the tracked pair's market caps.
    pub market_cap_ratio: f64,
}

/// The most recent analysis item posted by the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// When the item was posted.
    pub timestamp: DateTime<Utc>,
    /// Full text of the posted analysis.
    pub content: String,
    /// What prompted the post (scheduled, threshold, ...).
    pub trigger_type: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn price_point_round_trips_through_json() {
        let point = PricePoint {
            timestamp: "2026-08-01T12:00:00Z".parse().unwrap(),
            price: 142.5,
        };
        let json = serde_json::to_string(&point).unwrap();
        let back: PricePoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }
}
