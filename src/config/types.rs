//! Configuration types and logging options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and library configuration.

use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::config::ReconConfig;
use crate::export::STDOUT_PATH;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// Everything a run needs is passed in here: input and output locations,
/// logging options and the column mapping. Nothing is read from process-wide
/// defaults.
///
/// # Examples
///
/// ```no_run
/// use company_match::Config;
/// use std::path::{Path, PathBuf};
///
/// let config = Config {
///     internal: PathBuf::from("registry.csv"),
///     external: PathBuf::from("partner.csv"),
///     output: Some(PathBuf::from("matched.csv")),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Internal registry CSV
    pub internal: PathBuf,

    /// External partner feed CSV
    pub external: PathBuf,

    /// Matched records CSV (not written when `None`)
    pub output: Option<PathBuf>,

    /// JSON report with summaries and anomaly counts (not written when `None`)
    pub summary_json: Option<PathBuf>,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Column mapping, views and output options
    pub recon: ReconConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            internal: PathBuf::from("internal.csv"),
            external: PathBuf::from("external.csv"),
            output: None,
            summary_json: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            recon: ReconConfig::default(),
        }
    }
}

impl Config {
    /// Whether the full output or any view output is written to stdout.
    pub fn writes_records_to_stdout(&self) -> bool {
        let stdout = Path::new(STDOUT_PATH);
        self.output.as_deref() == Some(stdout)
            || self
                .recon
                .views
                .iter()
                .any(|view| view.output.as_deref() == Some(stdout))
    }
}
