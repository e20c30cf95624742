//! Error types for dashboard startup.
//!
//! These cover initialization only. Once the refresh loop is running,
//! failures are handled at the tick boundary and never abort the
//! process.

use pulse_core::ConfigError;
use pulse_db::DbError;
use pulse_server::startup::StartupError;

/// Errors that can abort dashboard startup.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Configuration could not be loaded.
    #[error("config error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: ConfigError,
    },

    /// The SQLite store could not be opened.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: DbError,
    },

    /// The API server could not be spawned.
    #[error("server error: {source}")]
    Server {
        /// The underlying startup error.
        #[from]
        source: StartupError,
    },
}
