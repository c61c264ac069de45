//! Recon configuration (TOML).
//!
//! Column mapping for both datasets, code parsing, join options, summary
//! views and output options. Every section is optional and falls back to
//! the defaults in `constants`.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Deserialize;
use strum_macros::{Display, EnumIter};

use crate::config::constants::*;
use crate::error_handling::ReconError;
use crate::matching::MatchResult;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReconConfig {
    pub name: String,
    pub columns: ColumnsConfig,
    pub codes: CodesConfig,
    pub join: JoinConfig,
    pub views: Vec<ViewConfig>,
    pub output: OutputConfig,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_RECON_NAME.to_string(),
            columns: ColumnsConfig::default(),
            codes: CodesConfig::default(),
            join: JoinConfig::default(),
            views: vec![
                ViewConfig {
                    label: ALL_RECORDS_LABEL.to_string(),
                    filter: ViewFilter::All,
                    output: None,
                },
                ViewConfig {
                    label: WEBSITE_MATCHES_LABEL.to_string(),
                    filter: ViewFilter::WebsiteMatch,
                    output: None,
                },
            ],
            output: OutputConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnsConfig {
    pub internal: InternalColumns,
    pub external: ExternalColumns,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InternalColumns {
    pub reg_number: String,
    pub website: String,
    pub codes: String,
    /// Carried through to the output when present in the data.
    pub name: Option<String>,
}

impl Default for InternalColumns {
    fn default() -> Self {
        Self {
            reg_number: DEFAULT_REG_NUMBER_COLUMN.to_string(),
            website: DEFAULT_WEBSITE_COLUMN.to_string(),
            codes: DEFAULT_CODES_COLUMN.to_string(),
            name: Some(DEFAULT_NAME_COLUMN.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExternalColumns {
    pub reg_number: String,
    pub website: String,
    pub codes: String,
}

impl Default for ExternalColumns {
    fn default() -> Self {
        Self {
            reg_number: DEFAULT_REG_NUMBER_COLUMN.to_string(),
            website: DEFAULT_WEBSITE_COLUMN.to_string(),
            codes: DEFAULT_CODES_COLUMN.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Codes + Join
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodesConfig {
    pub delimiter: char,
}

impl Default for CodesConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_CODE_DELIMITER,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JoinConfig {
    pub collision_suffix: String,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            collision_suffix: DEFAULT_COLLISION_SUFFIX.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// A named subset of the matched records to summarize.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewConfig {
    pub label: String,
    #[serde(default)]
    pub filter: ViewFilter,
    /// Write the records of this view to their own CSV.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ViewFilter {
    #[default]
    All,
    WebsiteMatch,
    NoWebsiteMatch,
    SubSicMatch,
    PartialMatch,
}

impl ViewFilter {
    /// Whether a record with this match result belongs to the view.
    pub fn matches(&self, result: &MatchResult) -> bool {
        match self {
            Self::All => true,
            Self::WebsiteMatch => result.website_match,
            Self::NoWebsiteMatch => !result.website_match,
            Self::SubSicMatch => result.sub_sic_match,
            Self::PartialMatch => result.partial_match,
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Columns removed from every written CSV (helper or scratch fields).
    pub drop_columns: Vec<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        let internal = &self.columns.internal;
        let external = &self.columns.external;
        let required = [
            ("columns.internal.reg_number", &internal.reg_number),
            ("columns.internal.website", &internal.website),
            ("columns.internal.codes", &internal.codes),
            ("columns.external.reg_number", &external.reg_number),
            ("columns.external.website", &external.website),
            ("columns.external.codes", &external.codes),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "{key} must not be empty"
                )));
            }
        }

        // The external key column is dropped from joined records
        for (key, value) in [
            ("columns.external.website", &external.website),
            ("columns.external.codes", &external.codes),
        ] {
            if *value == external.reg_number {
                return Err(ReconError::ConfigValidation(format!(
                    "{key} must differ from columns.external.reg_number"
                )));
            }
        }

        if self.join.collision_suffix.is_empty() {
            return Err(ReconError::ConfigValidation(
                "join.collision_suffix must not be empty".into(),
            ));
        }

        let delimiter = self.codes.delimiter;
        if CODE_WRAPPER_CHARS.contains(&delimiter) || delimiter.is_whitespace() {
            return Err(ReconError::ConfigValidation(format!(
                "codes.delimiter cannot be '{delimiter}'"
            )));
        }

        let mut labels = HashSet::new();
        for view in &self.views {
            if view.label.trim().is_empty() {
                return Err(ReconError::ConfigValidation(
                    "view label must not be empty".into(),
                ));
            }
            if !labels.insert(view.label.as_str()) {
                return Err(ReconError::ConfigValidation(format!(
                    "duplicate view label '{}'",
                    view.label
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
