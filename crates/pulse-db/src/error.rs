//! Error types for the store reader.
//!
//! All errors are propagated via [`DbError`], which wraps the underlying
//! [`sqlx`] errors with additional context about which operation failed.
//! Note that the [`MarketReader`](crate::reader::MarketReader)
//! implementation for [`MarketStore`](crate::market_store::MarketStore)
//! recovers from these at the reader boundary instead of surfacing them.

/// Errors that can occur in the store reader.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A SQLite operation failed.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] sqlx::Error),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The store is unreachable or refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
