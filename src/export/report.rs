//! JSON run report.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::error_handling::AnomalyStats;
use crate::summary::Summary;

use super::pipe::open_output;

/// Run metadata at the top of the report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub name: String,
    pub version: String,
    /// RFC 3339 timestamp of when the run finished.
    pub run_at: String,
    pub internal_rows: usize,
    pub external_rows: usize,
    pub joined_records: usize,
    pub elapsed_seconds: f64,
}

/// Everything a run produced apart from the record-level output.
#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: ReportMeta,
    pub summaries: Vec<Summary>,
    pub anomalies: AnomalyStats,
}

impl ReconReport {
    pub fn summary(&self, label: &str) -> Option<&Summary> {
        self.summaries.iter().find(|s| s.label == label)
    }
}

/// Writes the report as pretty-printed JSON to `path` (`-` for stdout).
pub fn write_report(path: &Path, report: &ReconReport) -> Result<()> {
    let mut out = open_output(path)?;
    serde_json::to_writer_pretty(&mut out, report)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    writeln!(out)?;
    out.flush()?;
    info!("Wrote run report to {}", path.display());
    Ok(())
}
