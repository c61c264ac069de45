//! Error handling and anomaly statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, pipeline, config)
//! - Anomaly statistics tracking
//!
//! Failures are split into:
//! - **Errors**: precondition violations, missing columns and bad config; these stop the run
//! - **Anomalies**: per-record problems (bad code cell, bad domain, repeated key) that
//!   degrade the record to "no match" and are only counted

mod stats;
mod types;

// Re-export public API
pub use stats::AnomalyStats;
pub use types::{AnomalyType, InitializationError, ReconError, Side};
