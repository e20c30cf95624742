//! Publisher that bridges the refresh loop to the API server state.
//!
//! After each tick, the fresh document is swapped into the shared
//! [`AppState`] and broadcast to all connected `WebSocket` clients.

use std::sync::Arc;

use pulse_core::CachePublisher;
use pulse_server::AppState;
use pulse_types::CacheDocument;
use tracing::debug;

/// Callback that hands each refreshed document to the server.
pub struct StatePublisher {
    state: Arc<AppState>,
}

impl StatePublisher {
    /// Create a publisher backed by the given app state.
    pub const fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

impl CachePublisher for StatePublisher {
    async fn publish(&self, document: CacheDocument) {
        let receivers = self.state.replace(document).await;
        debug!(receivers, "Cache document swapped and broadcast");
    }
}
