//! Export of reconciliation results.
//!
//! Matched records go to CSV (the full set and one file per view that asks
//! for it); summaries and anomaly counts go to a JSON report.

mod csv;
mod pipe;
mod report;

pub use csv::{export_csv, write_matched_csv};
pub use pipe::STDOUT_PATH;
pub use report::{write_report, ReconReport, ReportMeta};
