//! Record joining and per-record matching.
//!
//! Each stage consumes the previous stage's set and returns an enriched one:
//!
//! - `join` pairs internal and external rows on registration number
//! - `annotate_website_match` adds the website flag
//! - `annotate_sic_match` adds the exact and partial SIC flags
//!
//! Per-record problems never fail a stage; they degrade the record to
//! "no match" and are counted in the set's `anomalies`.

mod join;
mod taxonomy;
mod website;

pub use join::{join, normalize_reg_number};
pub use taxonomy::{annotate_sic_match, code_prefix, parse_codes, sic_match, SicMatch};
pub use website::{annotate_website_match, canonical_website, websites_match};

use serde::Serialize;

use crate::error_handling::AnomalyStats;

/// Positions of the columns the matchers read, within a joined record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub internal_reg_number: usize,
    pub internal_website: usize,
    pub internal_codes: usize,
    pub internal_name: Option<usize>,
    pub external_website: usize,
    pub external_codes: usize,
}

/// One internal row paired with its external counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRecord {
    /// Normalized registration number both rows share.
    pub reg_number: String,
    /// Internal columns followed by external columns, aligned with the set's headers.
    pub values: Vec<Option<String>>,
}

impl JoinedRecord {
    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|v| v.as_deref())
    }
}

/// Output of the join.
#[derive(Debug, Clone)]
pub struct JoinedSet {
    pub headers: Vec<String>,
    pub layout: Layout,
    pub records: Vec<JoinedRecord>,
    pub anomalies: AnomalyStats,
}

impl JoinedSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsiteRecord {
    pub record: JoinedRecord,
    pub website_match: bool,
}

/// Joined records annotated with the website flag.
#[derive(Debug, Clone)]
pub struct WebsiteSet {
    pub headers: Vec<String>,
    pub layout: Layout,
    pub records: Vec<WebsiteRecord>,
    pub anomalies: AnomalyStats,
}

/// The three match flags of a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub website_match: bool,
    pub sub_sic_match: bool,
    pub partial_match: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRecord {
    pub record: JoinedRecord,
    pub result: MatchResult,
}

/// Fully annotated records, ready for summaries and output.
#[derive(Debug, Clone)]
pub struct MatchedSet {
    pub headers: Vec<String>,
    pub layout: Layout,
    pub records: Vec<MatchedRecord>,
    pub anomalies: AnomalyStats,
}

impl MatchedSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Cell text with surrounding whitespace removed; `None` when blank.
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
