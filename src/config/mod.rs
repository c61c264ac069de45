//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (default column names, labels, separators)
//! - The library `Config` and logging option types
//! - The TOML-backed `ReconConfig` (column mapping, views, output options)

mod constants;
mod recon;
mod types;

// Re-export all constants
pub use constants::*;
pub use recon::{
    CodesConfig, ColumnsConfig, ExternalColumns, InternalColumns, JoinConfig, OutputConfig,
    ReconConfig, ViewConfig, ViewFilter,
};
pub use types::{Config, LogFormat, LogLevel};
