//! `WebSocket` handler for real-time cache document streaming.
//!
//! Clients connect to `GET /ws/updates` and receive JSON event frames
//! of the shape `{"event": "...", "data": <cache document>}`. A newly
//! connected client gets exactly one `initial_data` event carrying the
//! current snapshot, then a `data_update` event every refresh tick.
//!
//! If a client falls behind, lagged documents are silently skipped and
//! the client resumes from the most recent one.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use pulse_types::CacheDocument;
use serde::Serialize;
use tracing::{debug, warn};

use crate::state::AppState;

/// Event name sent once to a newly connected subscriber.
pub const EVENT_INITIAL: &str = "initial_data";

/// Event name broadcast to all subscribers on every refresh tick.
pub const EVENT_UPDATE: &str = "data_update";

/// Wire envelope for a pushed cache document.
#[derive(Serialize)]
struct WsEvent<'a> {
    /// Event name: [`EVENT_INITIAL`] or [`EVENT_UPDATE`].
    event: &'static str,
    /// The cache document payload.
    data: &'a CacheDocument,
}

/// Encode an event envelope as a JSON text frame body.
fn encode_event(
    event: &'static str,
    document: &CacheDocument,
) -> Result<String, serde_json::Error> {
    serde_json::to_string(&WsEvent {
        event,
        data: document,
    })
}

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming cache documents.
///
/// # Route
///
/// `GET /ws/updates`
pub async fn ws_updates(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Handle the `WebSocket` lifecycle: send the initial snapshot, then
/// forward every broadcast document as a text frame.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("WebSocket client connected");

    // Subscribe before snapshotting so a refresh landing in between
    // cannot be lost: the client sees it as its initial document or as
    // the first update, never neither.
    let mut rx = state.subscribe();

    let initial = state.current().await;
    match encode_event(EVENT_INITIAL, &initial) {
        Ok(json) => {
            if socket.send(Message::Text(json.into())).await.is_err() {
                debug!("WebSocket client disconnected before initial data");
                return;
            }
        }
        Err(e) => {
            warn!("Failed to serialize initial document: {e}");
            return;
        }
    }

    loop {
        tokio::select! {
            // Receive a refreshed document from the refresh loop.
            result = rx.recv() => {
                match result {
                    Ok(document) => {
                        let json = match encode_event(EVENT_UPDATE, &document) {
                            Ok(j) => j,
                            Err(e) => {
                                warn!("Failed to serialize document update: {e}");
                                continue;
                            }
                        };
                        if socket.send(Message::Text(json.into())).await.is_err() {
                            debug!("WebSocket client disconnected (send failed)");
                            return;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        debug!(skipped = n, "WebSocket client lagged, skipping ahead");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!("Broadcast channel closed, shutting down WebSocket");
                        return;
                    }
                }
            }
            // Check if the client sent a close frame or disconnected.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let pong = Message::Pong(data);
                        if socket.send(pong).await.is_err() {
                            debug!("WebSocket client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {e}");
                        return;
                    }
                    _ => {
                        // Ignore other message types (text, binary from client).
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pulse_types::Symbol;

    use super::*;

    #[test]
    fn event_envelope_has_the_wire_shape() {
        let document = CacheDocument::empty(&[Symbol::from("SOL")]);
        let json = encode_event(EVENT_INITIAL, &document).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["event"], "initial_data");
        assert_eq!(value["data"]["latest_analysis"], "");
        assert!(value["data"]["price_history"].get("SOL").is_some());
    }

    #[test]
    fn update_event_uses_the_update_name() {
        let document = CacheDocument::default();
        let json = encode_event(EVENT_UPDATE, &document).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["event"], "data_update");
    }
}
