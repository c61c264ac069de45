//! company_match library: registry-to-partner company reconciliation
//!
//! This library joins an internal company registry with an external partner
//! feed on registration number, then checks each joined record for agreement
//! on website domain and SIC classification codes, and aggregates match rates
//! over configurable views.
//!
//! # Example
//!
//! ```no_run
//! use company_match::{run_reconciliation, Config};
//! use std::path::PathBuf;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     internal: PathBuf::from("registry.csv"),
//!     external: PathBuf::from("partner.csv"),
//!     output: Some(PathBuf::from("matched.csv")),
//!     ..Default::default()
//! };
//!
//! let report = run_reconciliation(&config)?;
//! for summary in &report.summaries {
//!     println!("{}: {:.1}% website matches", summary.label, summary.website_match_rate);
//! }
//! # Ok(())
//! # }
//! ```

mod app;
pub mod config;
pub mod domain;
pub mod error_handling;
pub mod export;
pub mod initialization;
pub mod matching;
pub mod pipeline;
pub mod records;
pub mod summary;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, ReconConfig};
pub use domain::normalize_domain;
pub use error_handling::ReconError;
pub use export::ReconReport;
pub use run::{load_recon_config, run_reconciliation};

// Internal run module (file loading, pipeline, outputs)
mod run {
    use std::path::Path;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use chrono::Utc;
    use log::info;

    use crate::app::{print_anomaly_statistics, print_simple_summary, print_summaries};
    use crate::config::{Config, ReconConfig, ViewFilter};
    use crate::export::{export_csv, write_report, ReconReport, ReportMeta};
    use crate::pipeline::reconcile;
    use crate::records::load_table;

    /// Reads and validates a TOML recon config.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, is not valid TOML, has unknown
    /// keys, or does not pass validation.
    pub fn load_recon_config(path: &Path) -> Result<ReconConfig> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = ReconConfig::from_toml(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Runs a reconciliation with the provided configuration.
    ///
    /// Loads both CSV inputs, joins and matches them, logs the summaries and
    /// anomaly counts, then writes whichever outputs the configuration asks
    /// for: the full matched set, one CSV per view with an `output` path,
    /// and the JSON report.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - An input file cannot be read or is not valid CSV
    /// - The recon config does not pass validation
    /// - A configured column is missing from an input
    /// - An output file cannot be written
    pub fn run_reconciliation(config: &Config) -> Result<ReconReport> {
        let start_time = Instant::now();
        let recon = &config.recon;
        info!("Starting reconciliation '{}'", recon.name);

        let internal = load_table(&config.internal).context("Failed to load internal dataset")?;
        let external = load_table(&config.external).context("Failed to load external dataset")?;

        let result = reconcile(recon, internal, external).context("Reconciliation failed")?;

        print_summaries(&result.summaries);
        print_anomaly_statistics(result.anomalies());

        let drop_columns = &recon.output.drop_columns;
        if let Some(path) = &config.output {
            export_csv(path, &result.matched, ViewFilter::All, drop_columns)?;
        }
        for view in &recon.views {
            if let Some(path) = &view.output {
                export_csv(path, &result.matched, view.filter, drop_columns)
                    .with_context(|| format!("Failed to write view '{}'", view.label))?;
            }
        }

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        let report = ReconReport {
            meta: ReportMeta {
                name: recon.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                run_at: Utc::now().to_rfc3339(),
                internal_rows: result.internal_rows,
                external_rows: result.external_rows,
                joined_records: result.matched.len(),
                elapsed_seconds,
            },
            anomalies: result.anomalies().clone(),
            summaries: result.summaries,
        };

        if let Some(path) = &config.summary_json {
            write_report(path, &report)?;
        }

        print_simple_summary(
            report.meta.internal_rows,
            report.meta.external_rows,
            report.meta.joined_records,
            elapsed_seconds,
        );

        Ok(report)
    }
}
