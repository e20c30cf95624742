//! Server startup helper for embedding in the dashboard binary.
//!
//! Provides [`spawn_server`] which launches the HTTP + `WebSocket`
//! server on a background Tokio task. The dashboard binary calls this
//! during startup so the API runs concurrently with the refresh loop.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::server::{ServerConfig, ServerError, start_server};
use crate::state::AppState;

/// Errors that can occur when spawning the dashboard server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Spawn the dashboard HTTP server on a background Tokio task.
///
/// Returns a [`JoinHandle`] so the caller can manage the server's
/// lifecycle alongside the refresh loop. The server runs until the
/// Tokio runtime is shut down or the task is aborted.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the configured address cannot
/// be parsed. Bind failures surface inside the background task and are
/// logged there.
pub async fn spawn_server(
    config: ServerConfig,
    state: Arc<AppState>,
) -> Result<JoinHandle<()>, StartupError> {
    // Verify the address is parseable before spawning the background
    // task, catching obvious misconfigurations early.
    let addr_str = format!("{}:{}", config.host, config.port);
    let _: std::net::SocketAddr = addr_str.parse().map_err(|e| {
        StartupError::Server(ServerError::Bind(format!(
            "invalid address {addr_str}: {e}"
        )))
    })?;

    let port = config.port;
    let handle = tokio::spawn(async move {
        if let Err(e) = start_server(&config, state).await {
            tracing::error!(error = %e, "Dashboard server exited with error");
        }
    });

    tracing::info!(port, "Dashboard server spawned on background task");

    Ok(handle)
}
