//! Main application modules.
//!
//! This module provides the end-of-run statistics printing used by the
//! library entry point.

pub mod statistics;

// Re-export public API
pub use statistics::{print_anomaly_statistics, print_simple_summary, print_summaries};
