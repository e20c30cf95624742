//! The timer-driven refresh loop and its publisher seam.
//!
//! One background task owns all writes to the cache: at each tick it
//! computes the 24-hour cutoff, reads every slice for the tracked
//! symbols, assembles a fresh [`CacheDocument`], and hands it to the
//! [`CachePublisher`] for atomic swap-in and broadcast.
//!
//! The interval is measured sleep-then-run, so a tick can never overlap
//! with itself. A failing tick is logged and skipped -- the cache keeps
//! its last-known-good value and the next tick runs on schedule.

use std::time::Duration;

use chrono::{DateTime, Utc};
use pulse_db::{DbError, MarketReader};
use pulse_types::{CacheDocument, Symbol};
use tracing::{debug, info, warn};

use crate::assembler::{self, ReaderSlices, SymbolSlice};

/// Fixed time between refresh ticks.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Fixed history window served to clients, in hours.
pub const HISTORY_WINDOW_HOURS: i64 = 24;

/// Errors that can abort a single refresh tick.
///
/// The production store reader degrades failures to empty slices, so in
/// practice this only fires for reader implementations that choose to
/// propagate hard failures.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// A store read surfaced a hard failure.
    #[error("store read failed: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: DbError,
    },
}

/// Receives each freshly assembled document from the refresh loop.
///
/// This is the single-writer handoff seam: the production
/// implementation swaps the document into the server's shared state and
/// broadcasts it to WebSocket subscribers.
pub trait CachePublisher {
    /// Publish a new cache document.
    fn publish(&self, document: CacheDocument) -> impl Future<Output = ()>;
}

/// The earliest timestamp included in history queries, relative to `now`.
pub fn history_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_signed(chrono::Duration::hours(HISTORY_WINDOW_HOURS))
        .unwrap_or(now)
}

/// Read every slice for the tracked symbols and assemble a document.
///
/// # Errors
///
/// Returns [`RefreshError::Store`] if the reader propagates a failure;
/// the caller keeps the previous cache in that case.
pub async fn refresh_once<R: MarketReader>(
    reader: &R,
    symbols: &[Symbol],
) -> Result<CacheDocument, RefreshError> {
    let cutoff = history_cutoff(Utc::now());

    let mut slices = ReaderSlices::default();
    for symbol in symbols {
        let slice = SymbolSlice {
            prices: reader.price_history(symbol, cutoff).await?,
            volumes: reader.volume_history(symbol, cutoff).await?,
            moods: reader.mood_history(symbol, cutoff).await?,
        };
        slices.symbols.push((symbol.clone(), slice));
    }
    slices.correlations = reader.correlation_history(cutoff).await?;
    slices.latest_post = reader.latest_post().await?;

    Ok(assembler::assemble(slices))
}

/// Run one tick: refresh, then publish on success.
///
/// Returns `true` when a new document was published. A failed tick is
/// logged at WARN and leaves the cache untouched.
pub async fn execute_tick<R, P>(reader: &R, publisher: &P, symbols: &[Symbol]) -> bool
where
    R: MarketReader,
    P: CachePublisher,
{
    match refresh_once(reader, symbols).await {
        Ok(document) => {
            publisher.publish(document).await;
            debug!("Refresh tick published");
            true
        }
        Err(e) => {
            warn!(error = %e, "Refresh tick failed, keeping last-known-good cache");
            false
        }
    }
}

/// Drive the refresh loop forever.
///
/// Runs one tick immediately so the first client request is never
/// served from the empty startup cache, then ticks every
/// [`REFRESH_INTERVAL`]. This function never returns; the binary runs
/// it as its foreground task.
pub async fn run_refresh_loop<R, P>(reader: &R, publisher: &P, symbols: &[Symbol])
where
    R: MarketReader,
    P: CachePublisher,
{
    info!(
        interval_secs = REFRESH_INTERVAL.as_secs(),
        window_hours = HISTORY_WINDOW_HOURS,
        symbols = %symbols.iter().map(Symbol::as_str).collect::<Vec<_>>().join(","),
        "Refresh loop starting"
    );

    // Prime the cache before the timer cadence begins.
    execute_tick(reader, publisher, symbols).await;

    loop {
        tokio::time::sleep(REFRESH_INTERVAL).await;
        execute_tick(reader, publisher, symbols).await;
    }
}
