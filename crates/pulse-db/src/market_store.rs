//! Parameterized read operations over the analysis bot's schema.
//!
//! The schema is an external collaborator owned by the bot:
//!
//! - `market_data(chain, timestamp, current_price, volume, ...)`
//! - `mood_data(chain, timestamp, mood)`
//! - `correlation_data(timestamp, price_correlation, volume_correlation,
//!   market_cap_ratio)`
//! - `posted_content(timestamp, content, trigger_type)`
//!
//! Every history query is scoped to a time cutoff and returns rows in
//! ascending timestamp order. Rows whose projected numeric column is
//! NULL are excluded in SQL; the cache document declares plain numbers.

use chrono::{DateTime, Utc};
use pulse_types::{CorrelationPoint, MoodPoint, PostRecord, PricePoint, Symbol, VolumePoint};

use crate::error::DbError;
use crate::sqlite::SqlitePool;

/// Read operations on the market store.
///
/// The `fetch_*` methods propagate [`DbError`]; the
/// [`MarketReader`](crate::reader::MarketReader) implementation wraps
/// them with the degrade-to-empty policy the refresh loop relies on.
#[derive(Clone)]
pub struct MarketStore {
    pool: SqlitePool,
}

impl MarketStore {
    /// Create a store bound to a connection pool.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Price observations for `symbol` since `cutoff`, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn fetch_price_history(
        &self,
        symbol: &Symbol,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<PricePoint>, DbError> {
        let rows: Vec<(DateTime<Utc>, f64)> = sqlx::query_as(
            r"SELECT timestamp, current_price
              FROM market_data
              WHERE chain = ?1 AND timestamp >= ?2 AND current_price IS NOT NULL
              ORDER BY timestamp ASC",
        )
        .bind(symbol.as_str())
        .bind(cutoff)
        .fetch_all(self.pool.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(timestamp, price)| PricePoint { timestamp, price })
            .collect())
    }

    /// Volume observations for `symbol` since `cutoff`, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn fetch_volume_history(
        &self,
        symbol: &Symbol,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<VolumePoint>, DbError> {
        let rows: Vec<(DateTime<Utc>, f64)> = sqlx::query_as(
            r"SELECT timestamp, volume
              FROM market_data
              WHERE chain = ?1 AND timestamp >= ?2 AND volume IS NOT NULL
              ORDER BY timestamp ASC",
        )
        .bind(symbol.as_str())
        .bind(cutoff)
        .fetch_all(self.pool.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(timestamp, volume)| VolumePoint { timestamp, volume })
            .collect())
    }

    /// Mood observations for `symbol` since `cutoff`, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn fetch_mood_history(
        &self,
        symbol: &Symbol,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<MoodPoint>, DbError> {
        let rows: Vec<(DateTime<Utc>, String)> = sqlx::query_as(
            r"SELECT timestamp, mood
              FROM mood_data
              WHERE chain = ?1 AND timestamp >= ?2
              ORDER BY timestamp ASC",
        )
        .bind(symbol.as_str())
        .bind(cutoff)
        .fetch_all(self.pool.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(timestamp, mood)| MoodPoint { timestamp, mood })
            .collect())
    }

    /// Cross-asset correlation observations since `cutoff`, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn fetch_correlation_history(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<CorrelationPoint>, DbError> {
        let rows: Vec<(DateTime<Utc>, f64, f64, f64)> = sqlx::query_as(
            r"SELECT timestamp, price_correlation, volume_correlation, market_cap_ratio
              FROM correlation_data
              WHERE timestamp >= ?1
                AND price_correlation IS NOT NULL
                AND volume_correlation IS NOT NULL
                AND market_cap_ratio IS NOT NULL
              ORDER BY timestamp ASC",
        )
        .bind(cutoff)
        .fetch_all(self.pool.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(timestamp, price_correlation, volume_correlation, market_cap_ratio)| {
                    CorrelationPoint {
                        timestamp,
                        price_correlation,
                        volume_correlation,
                        market_cap_ratio,
                    }
                },
            )
            .collect())
    }

    /// The single most recent posted analysis, irrespective of cutoff.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn fetch_latest_post(&self) -> Result<Option<PostRecord>, DbError> {
        let row: Option<(DateTime<Utc>, String, String)> = sqlx::query_as(
            r"SELECT timestamp, content, trigger_type
              FROM posted_content
              ORDER BY timestamp DESC
              LIMIT 1",
        )
        .fetch_optional(self.pool.pool())
        .await?;

        Ok(row.map(|(timestamp, content, trigger_type)| PostRecord {
            timestamp,
            content,
            trigger_type,
        }))
    }
}
