//! Error type definitions.
//!
//! This module defines the error types and anomaly categories used throughout
//! the application.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Which input dataset a column or record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Internal,
    External,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Internal => f.write_str("internal"),
            Side::External => f.write_str("external"),
        }
    }
}

/// Error types for the reconciliation pipeline.
///
/// Precondition variants (`DataNotLoaded`, `NotJoined`, `WebsitesNotMatched`,
/// `NotMatched`) are
/// returned when a stage is asked to run before the stage it depends on.
#[derive(Error, Debug)]
pub enum ReconError {
    /// A stage needing both datasets ran before they were supplied.
    #[error("data not loaded: both datasets must be supplied before joining")]
    DataNotLoaded,

    /// A matching stage ran before the join.
    #[error("no registration-number matched data: run the join first")]
    NotJoined,

    /// SIC matching ran before website matching.
    #[error("websites not matched: run website matching before SIC matching")]
    WebsitesNotMatched,

    /// A summary or output was requested before SIC matching.
    #[error("records not matched: run website and SIC matching first")]
    NotMatched,

    /// A configured column is absent from an input dataset.
    #[error("{side} dataset: missing column '{column}'")]
    MissingColumn { side: Side, column: String },

    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Config validation error (empty column name, duplicate view, etc.).
    #[error("config validation error: {0}")]
    ConfigValidation(String),
}

/// Per-record anomalies absorbed by the pipeline.
///
/// None of these abort a run. They are counted so the end-of-run report can
/// show how much of the data was degraded to "no match".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum AnomalyType {
    /// Registration number empty after normalization; row cannot be joined.
    BlankRegNumber,
    /// Registration number repeated in the internal dataset; first row kept.
    DuplicateInternalRegNumber,
    /// Registration number repeated in the external dataset; first row kept.
    DuplicateExternalRegNumber,
    /// Website missing on one or both sides of a joined record.
    MissingWebsite,
    /// A website normalized to an empty domain.
    EmptyCanonicalDomain,
    /// A non-empty code cell yielded no codes.
    UnparseableCodeCell,
}

impl std::fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AnomalyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyType::BlankRegNumber => "Blank registration number",
            AnomalyType::DuplicateInternalRegNumber => "Duplicate internal registration number",
            AnomalyType::DuplicateExternalRegNumber => "Duplicate external registration number",
            AnomalyType::MissingWebsite => "Missing website",
            AnomalyType::EmptyCanonicalDomain => "Empty canonical domain",
            AnomalyType::UnparseableCodeCell => "Unparseable code cell",
        }
    }

    /// Stable snake_case key used in the JSON report.
    pub fn key(&self) -> &'static str {
        match self {
            AnomalyType::BlankRegNumber => "blank_reg_number",
            AnomalyType::DuplicateInternalRegNumber => "duplicate_internal_reg_number",
            AnomalyType::DuplicateExternalRegNumber => "duplicate_external_reg_number",
            AnomalyType::MissingWebsite => "missing_website",
            AnomalyType::EmptyCanonicalDomain => "empty_canonical_domain",
            AnomalyType::UnparseableCodeCell => "unparseable_code_cell",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn test_anomaly_type_as_str_unique() {
        let names: HashSet<&str> = AnomalyType::iter().map(|a| a.as_str()).collect();
        assert_eq!(names.len(), AnomalyType::iter().count());
    }

    #[test]
    fn test_anomaly_type_keys_are_snake_case() {
        for anomaly in AnomalyType::iter() {
            let key = anomaly.key();
            assert!(!key.is_empty());
            assert!(
                key.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "{key} is not snake_case"
            );
        }
    }

    #[test]
    fn test_missing_column_message() {
        let err = ReconError::MissingColumn {
            side: Side::External,
            column: "NW_Website".into(),
        };
        assert_eq!(
            err.to_string(),
            "external dataset: missing column 'NW_Website'"
        );
    }

    #[test]
    fn test_precondition_messages() {
        assert!(ReconError::DataNotLoaded.to_string().contains("data not loaded"));
        assert!(ReconError::NotJoined.to_string().contains("join"));
        assert!(ReconError::WebsitesNotMatched
            .to_string()
            .contains("website matching"));
        assert!(ReconError::NotMatched.to_string().contains("not matched"));
    }
}
