//! Dashboard binary for Pulse.
//!
//! This is the main entry point that wires together the SQLite store
//! reader, the refresh loop, and the API server. It loads
//! configuration, opens the store, spawns the server on a background
//! task, and drives the refresh loop in the foreground for the life of
//! the process.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `pulse.yaml` (optional) + environment
//! 3. Open the read-only SQLite store
//! 4. Create the shared cache state
//! 5. Spawn the API server
//! 6. Run the refresh loop (primes the cache immediately, then every
//!    30 seconds)

mod error;
mod publisher;

use std::path::Path;
use std::sync::Arc;

use pulse_core::config::DashboardConfig;
use pulse_core::refresh;
use pulse_db::{MarketStore, SqlitePool};
use pulse_server::{AppState, ServerConfig, spawn_server};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::DashboardError;
use crate::publisher::StatePublisher;

/// Default location of the optional YAML configuration file.
const CONFIG_PATH: &str = "pulse.yaml";

/// Application entry point for the dashboard.
///
/// Initializes all subsystems and runs the refresh loop. Returns an
/// error only when startup fails; runtime failures are absorbed at the
/// tick boundary.
///
/// # Errors
///
/// Returns an error if configuration loading, store opening, or server
/// startup fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("pulse-dashboard starting");

    // 2. Load configuration.
    let config = DashboardConfig::load(Path::new(CONFIG_PATH)).map_err(DashboardError::from)?;
    info!(
        database_path = %config.store.database_path,
        host = %config.server.host,
        port = config.server.port,
        symbols = config.tracking.symbols.len(),
        "Configuration loaded"
    );

    // The secret is a deployment responsibility; the dashboard only
    // surfaces the misconfiguration.
    if config.server.uses_default_secret() {
        warn!("DASHBOARD_SECRET_KEY not set, falling back to the insecure default");
    }

    // 3. Open the read-only SQLite store.
    let pool = SqlitePool::connect_path(&config.store.database_path)
        .await
        .map_err(DashboardError::from)?;
    let store = MarketStore::new(pool);
    info!("Market store opened");

    // 4. Create the shared cache state.
    let state = Arc::new(AppState::new(&config.tracking.symbols));

    // 5. Spawn the API server on a background task.
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let _server_handle = spawn_server(server_config, Arc::clone(&state))
        .await
        .map_err(DashboardError::from)?;

    // 6. Run the refresh loop in the foreground. It primes the cache
    //    immediately so the first request never sees the empty startup
    //    document, then ticks every 30 seconds until the process exits.
    let state_publisher = StatePublisher::new(state);
    refresh::run_refresh_loop(&store, &state_publisher, &config.tracking.symbols).await;

    Ok(())
}
