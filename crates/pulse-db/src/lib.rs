//! SQLite store reader for the Pulse market dashboard.
//!
//! The analysis bot writes market, mood, correlation, and posted-content
//! rows into a local SQLite file; this crate is the dashboard's read-only
//! view of that store. It provides the connection pool, the parameterized
//! history queries, and the [`MarketReader`] boundary consumed by the
//! refresh loop.
//!
//! Uses [`sqlx`] with runtime query construction (not compile-time
//! checked) so no live database is required at build time. All queries
//! are parameterized.
//!
//! # Modules
//!
//! - [`sqlite`] -- Connection pool and configuration
//! - [`market_store`] -- Parameterized read operations over the schema
//! - [`reader`] -- The [`MarketReader`] trait (degrade-to-empty boundary)
//! - [`error`] -- Shared error type

pub mod error;
pub mod market_store;
pub mod reader;
pub mod sqlite;

// Re-export primary types for convenience.
pub use error::DbError;
pub use market_store::MarketStore;
pub use reader::MarketReader;
pub use sqlite::{SqliteConfig, SqlitePool};
