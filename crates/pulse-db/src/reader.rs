//! The store-reader boundary consumed by the refresh loop.
//!
//! [`MarketReader`] is the injection seam: the refresh loop is generic
//! over it, production wires in [`MarketStore`], and tests substitute
//! stubs. The signatures return `Result` so an implementation *may*
//! surface a hard failure to the tick boundary -- the [`MarketStore`]
//! implementation never does. It recovers every query failure locally
//! and degrades to an empty result, preferring a stale or partial cache
//! over a crashed refresh loop.

use chrono::{DateTime, Utc};
use pulse_types::{CorrelationPoint, MoodPoint, PostRecord, PricePoint, Symbol, VolumePoint};
use tracing::warn;

use crate::error::DbError;
use crate::market_store::MarketStore;

/// Read-only view of the market store, one method per cache slice.
///
/// All history methods take a time cutoff and return records sorted
/// ascending by timestamp with `timestamp >= cutoff`.
pub trait MarketReader {
    /// Price observations for `symbol` since `cutoff`.
    fn price_history(
        &self,
        symbol: &Symbol,
        cutoff: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<PricePoint>, DbError>>;

    /// Volume observations for `symbol` since `cutoff`.
    fn volume_history(
        &self,
        symbol: &Symbol,
        cutoff: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<VolumePoint>, DbError>>;

    /// Mood observations for `symbol` since `cutoff`.
    fn mood_history(
        &self,
        symbol: &Symbol,
        cutoff: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<MoodPoint>, DbError>>;

    /// Cross-asset correlation observations since `cutoff`.
    fn correlation_history(
        &self,
        cutoff: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<CorrelationPoint>, DbError>>;

    /// The most recent posted analysis, irrespective of cutoff.
    fn latest_post(&self) -> impl Future<Output = Result<Option<PostRecord>, DbError>>;
}

impl MarketReader for MarketStore {
    async fn price_history(
        &self,
        symbol: &Symbol,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<PricePoint>, DbError> {
        Ok(self
            .fetch_price_history(symbol, cutoff)
            .await
            .unwrap_or_else(|e| {
                warn!(symbol = %symbol, error = %e, "price history read failed, degrading to empty");
                Vec::new()
            }))
    }

    async fn volume_history(
        &self,
        symbol: &Symbol,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<VolumePoint>, DbError> {
        Ok(self
            .fetch_volume_history(symbol, cutoff)
            .await
            .unwrap_or_else(|e| {
                warn!(symbol = %symbol, error = %e, "volume history read failed, degrading to empty");
                Vec::new()
            }))
    }

    async fn mood_history(
        &self,
        symbol: &Symbol,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<MoodPoint>, DbError> {
        Ok(self
            .fetch_mood_history(symbol, cutoff)
            .await
            .unwrap_or_else(|e| {
                warn!(symbol = %symbol, error = %e, "mood history read failed, degrading to empty");
                Vec::new()
            }))
    }

    async fn correlation_history(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<CorrelationPoint>, DbError> {
        Ok(self
            .fetch_correlation_history(cutoff)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "correlation history read failed, degrading to empty");
                Vec::new()
            }))
    }

    async fn latest_post(&self) -> Result<Option<PostRecord>, DbError> {
        Ok(self.fetch_latest_post().await.unwrap_or_else(|e| {
            warn!(error = %e, "latest post read failed, degrading to none");
            None
        }))
    }
}
