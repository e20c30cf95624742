//! Dashboard API server for the Pulse market dashboard.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws/updates`) pushing the cache document
//!   to subscribers via [`tokio::sync::broadcast`] -- one `initial_data`
//!   event on connect, then a `data_update` event per refresh tick
//! - **Snapshot endpoint** (`GET /api/current-data`) returning the
//!   current cache document as JSON
//! - **Page shell** (`GET /`) -- the static dashboard entry point
//!
//! # Architecture
//!
//! The server reads from a process-wide cache slot owned by the refresh
//! loop. Replacement is a whole-document `Arc` swap, so a reader sees
//! either the entirely-old or entirely-new document, never a partially
//! updated one. `WebSocket` clients receive documents via a broadcast
//! channel with automatic lag handling.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use startup::spawn_server;
pub use state::AppState;
