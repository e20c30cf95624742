//! Shared application state for the dashboard API server.
//!
//! [`AppState`] holds the broadcast channel for cache documents and the
//! process-wide cache slot. The refresh loop is the only writer: it
//! calls [`AppState::replace`] once per tick. Everything else receives
//! read-only snapshots.

use std::sync::Arc;

use pulse_types::{CacheDocument, Symbol};
use tokio::sync::{RwLock, broadcast};

/// Capacity of the broadcast channel for cache documents.
///
/// If a subscriber falls behind by more than this many messages it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest document.
const BROADCAST_CAPACITY: usize = 64;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The
/// cache slot holds an `Arc<CacheDocument>` that is swapped wholesale on
/// every refresh; readers clone the `Arc` out and never observe a
/// partially updated document.
pub struct AppState {
    /// Broadcast sender for refreshed cache documents.
    tx: broadcast::Sender<Arc<CacheDocument>>,
    /// The current cache document (swapped each refresh tick).
    cache: RwLock<Arc<CacheDocument>>,
}

impl AppState {
    /// Create application state with an empty startup document.
    ///
    /// The startup document already carries every tracked symbol key so
    /// a client connecting before the first refresh still sees the full
    /// shape.
    pub fn new(symbols: &[Symbol]) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            tx,
            cache: RwLock::new(Arc::new(CacheDocument::empty(symbols))),
        }
    }

    /// Return the current cache document.
    pub async fn current(&self) -> Arc<CacheDocument> {
        Arc::clone(&*self.cache.read().await)
    }

    /// Swap in a freshly assembled document and broadcast it.
    ///
    /// The swap is a single `Arc` assignment under the write lock; the
    /// broadcast happens after the swap so a subscriber that connects
    /// in between serves the new document as its initial snapshot.
    ///
    /// Returns the number of subscribers that received the broadcast.
    /// Returns 0 if no clients are connected (this is not an error).
    pub async fn replace(&self, document: CacheDocument) -> usize {
        let document = Arc::new(document);
        *self.cache.write().await = Arc::clone(&document);
        // send returns Err only when there are zero receivers, which is
        // normal when no WebSocket clients are connected.
        self.tx.send(document).unwrap_or(0)
    }

    /// Subscribe to the cache broadcast channel.
    ///
    /// Returns a receiver that yields every document the refresh loop
    /// publishes after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<CacheDocument>> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tracked() -> Vec<Symbol> {
        vec![Symbol::from("SOL"), Symbol::from("DOT")]
    }

    #[tokio::test]
    async fn startup_document_has_every_symbol_key() {
        let state = AppState::new(&tracked());
        let document = state.current().await;
        assert_eq!(document.price_history.len(), 2);
        assert_eq!(document.latest_analysis, "");
    }

    #[tokio::test]
    async fn replace_swaps_the_whole_document() {
        let state = AppState::new(&tracked());

        let mut fresh = CacheDocument::empty(&tracked());
        fresh.latest_analysis = String::from("new analysis");
        state.replace(fresh.clone()).await;

        assert_eq!(*state.current().await, fresh);
    }

    #[tokio::test]
    async fn subscribers_receive_each_replacement() {
        let state = AppState::new(&tracked());
        let mut rx = state.subscribe();

        let mut fresh = CacheDocument::empty(&tracked());
        fresh.latest_analysis = String::from("tick 1");
        let receivers = state.replace(fresh).await;
        assert_eq!(receivers, 1);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.latest_analysis, "tick 1");
        // The broadcast document and the stored snapshot are the same
        // replacement.
        assert_eq!(*state.current().await, *received);
    }

    #[tokio::test]
    async fn replace_without_subscribers_reports_zero_receivers() {
        let state = AppState::new(&tracked());
        let receivers = state.replace(CacheDocument::empty(&tracked())).await;
        assert_eq!(receivers, 0);
    }
}
