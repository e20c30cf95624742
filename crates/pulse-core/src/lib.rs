//! Cache assembly and refresh loop for the Pulse market dashboard.
//!
//! This crate owns the dashboard's only moving part: the timer-driven
//! refresh task that reads recent history from the store, assembles a
//! fresh [`CacheDocument`], and hands it to a publisher for atomic
//! swap-in and broadcast. It also owns configuration loading.
//!
//! # Modules
//!
//! - [`assembler`] -- Pure projection of store slices into the document
//! - [`refresh`] -- The tick loop, its constants, and the publisher seam
//! - [`config`] -- Typed YAML configuration with env overrides
//!
//! [`CacheDocument`]: pulse_types::CacheDocument

pub mod assembler;
pub mod config;
pub mod refresh;

// Re-export primary types for convenience.
pub use assembler::{ReaderSlices, SymbolSlice, assemble};
pub use config::{ConfigError, DashboardConfig};
pub use refresh::{
    CachePublisher, HISTORY_WINDOW_HOURS, REFRESH_INTERVAL, RefreshError, execute_tick,
    refresh_once, run_refresh_loop,
};
