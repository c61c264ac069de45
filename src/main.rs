//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `company_match` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use company_match::initialization::init_logger_with;
use company_match::{
    load_recon_config, normalize_domain, run_reconciliation, Config, LogFormat, LogLevel,
    ReconConfig,
};

#[derive(Debug, Parser)]
#[command(
    name = "company_match",
    version,
    about = "Reconcile company datasets by registration number, website and SIC codes"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Join two datasets and report website and SIC agreement
    Run(RunCommand),
    /// Check a recon config file without running it
    Validate {
        /// TOML recon config
        config: PathBuf,
    },
    /// Print the canonical domain of each website
    Normalize {
        #[arg(required = true)]
        websites: Vec<String>,
    },
}

#[derive(Debug, Args)]
struct RunCommand {
    /// Internal registry CSV
    #[arg(long)]
    internal: PathBuf,

    /// External partner feed CSV
    #[arg(long)]
    external: PathBuf,

    /// TOML recon config (column mapping, views, output options)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write all matched records to this CSV (`-` for stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write summaries and anomaly counts to this JSON file
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,
}

impl RunCommand {
    fn into_config(self) -> Result<Config> {
        let recon = match &self.config {
            Some(path) => load_recon_config(path)?,
            None => ReconConfig::default(),
        };
        Ok(Config {
            internal: self.internal,
            external: self.external,
            output: self.output,
            summary_json: self.summary_json,
            log_level: self.log_level,
            log_format: self.log_format,
            recon,
        })
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run(cmd) => run(cmd),
        Command::Validate { config } => validate(&config),
        Command::Normalize { websites } => {
            for website in &websites {
                println!("{}\t{}", website, normalize_domain(website));
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("company_match error: {:#}", e);
        process::exit(1);
    }
}

fn run(cmd: RunCommand) -> Result<()> {
    let config = cmd.into_config()?;
    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let report = run_reconciliation(&config)?;

    // Records went to stdout
    if config.writes_records_to_stdout() {
        return Ok(());
    }

    println!(
        "✅ Joined {} of {} internal record{} on registration number",
        report.meta.joined_records,
        report.meta.internal_rows,
        if report.meta.internal_rows == 1 { "" } else { "s" },
    );
    for summary in &report.summaries {
        println!(
            "{}: {} records, website {:.2}%, sub-SIC {:.2}%, partial {:.2}%",
            summary.label,
            summary.total_records,
            summary.website_match_rate,
            summary.sub_sic_match_rate,
            summary.partial_match_rate
        );
    }
    if let Some(path) = &config.output {
        println!("Matched records saved in {}", path.display());
    }
    Ok(())
}

fn validate(path: &Path) -> Result<()> {
    let config = load_recon_config(path)?;
    println!(
        "{}: OK ({} view{})",
        config.name,
        config.views.len(),
        if config.views.len() == 1 { "" } else { "s" }
    );
    Ok(())
}
