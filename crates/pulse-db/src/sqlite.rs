//! SQLite connection pool and configuration.
//!
//! The dashboard never owns the database file -- the analysis bot
//! creates and writes it. Connections are therefore opened read-only
//! against an existing file. An in-memory mode exists for tests.

use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::DbError;

/// Default maximum number of connections in the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default connection acquire timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default idle timeout in seconds.
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;

/// Path sentinel selecting an in-memory database.
const MEMORY_PATH: &str = ":memory:";

/// Configuration for the SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Filesystem path of the database file, or `":memory:"`.
    pub path: String,
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Timeout for acquiring a connection from the pool.
    pub connect_timeout: Duration,
    /// Idle connection timeout, `None` to keep idle connections open.
    pub idle_timeout: Option<Duration>,
    /// Open the database read-only. The dashboard only ever reads.
    pub read_only: bool,
}

impl SqliteConfig {
    /// Create a read-only configuration for an existing database file.
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_owned(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            idle_timeout: Some(Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS)),
            read_only: true,
        }
    }

    /// Create a writable in-memory configuration for tests.
    ///
    /// The pool is pinned to a single persistent connection: every
    /// SQLite in-memory connection is its own database, so a larger
    /// pool would hand out empty databases.
    pub fn in_memory() -> Self {
        Self {
            path: MEMORY_PATH.to_owned(),
            max_connections: 1,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            idle_timeout: None,
            read_only: false,
        }
    }

    /// Whether this configuration targets an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.path == MEMORY_PATH
    }

    /// Set the maximum number of connections.
    #[must_use]
    pub const fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Set the connection acquire timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }
}

/// Connection pool handle to the SQLite store.
///
/// Wraps a [`sqlx::SqlitePool`] and is cheap to clone; all clones share
/// the same pool.
#[derive(Clone)]
pub struct SqlitePool {
    pool: sqlx::SqlitePool,
}

impl SqlitePool {
    /// Open a pool using the provided configuration.
    ///
    /// The database file must already exist; the dashboard never
    /// creates it (schema ownership stays with the analysis bot).
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the database cannot be opened.
    pub async fn connect(config: &SqliteConfig) -> Result<Self, DbError> {
        let options = if config.is_in_memory() {
            SqliteConnectOptions::new().in_memory(true)
        } else {
            SqliteConnectOptions::new()
                .filename(&config.path)
                .read_only(config.read_only)
                .create_if_missing(false)
        };

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout);

        if config.is_in_memory() {
            // Keep the lone in-memory connection alive for the pool's
            // lifetime; dropping it would drop the database.
            pool_options = pool_options.min_connections(config.max_connections);
        }

        let pool = pool_options.connect_with(options).await?;

        tracing::info!(
            path = %config.path,
            max_connections = config.max_connections,
            read_only = config.read_only,
            "Opened SQLite store"
        );

        Ok(Self { pool })
    }

    /// Open a pool for a database file path with default settings.
    ///
    /// Convenience wrapper around [`SqlitePool::connect`] with
    /// [`SqliteConfig::new`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened.
    pub async fn connect_path(path: &str) -> Result<Self, DbError> {
        let config = SqliteConfig::new(path);
        Self::connect(&config).await
    }

    /// Return a reference to the underlying [`sqlx::SqlitePool`].
    pub const fn pool(&self) -> &sqlx::SqlitePool {
        &self.pool
    }

    /// Close all connections in the pool gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("SQLite pool closed");
    }
}
