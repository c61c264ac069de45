//! Staged reconciliation pipeline.
//!
//! `Reconciler` holds the output of the most recent stage. Stages must run in
//! order (load, join, website matching, SIC matching); asking for a stage
//! whose input is not there yet fails with a precondition error and leaves
//! the state untouched.

use log::{debug, info};

use crate::config::{ReconConfig, ViewConfig};
use crate::error_handling::{AnomalyStats, ReconError};
use crate::matching::{
    annotate_sic_match, annotate_website_match, join, JoinedSet, MatchedSet, WebsiteSet,
};
use crate::records::Table;
use crate::summary::{summarize, summarize_views, Summary};

#[derive(Debug, Default)]
enum Stage {
    #[default]
    Empty,
    Loaded {
        internal: Table,
        external: Table,
    },
    Joined(JoinedSet),
    WebsitesMatched(WebsiteSet),
    Matched(MatchedSet),
}

/// Runs the reconciliation stages one at a time.
///
/// # Examples
///
/// ```
/// use company_match::pipeline::Reconciler;
/// use company_match::records::Table;
/// use company_match::ReconConfig;
///
/// let config = ReconConfig::default();
/// let mut recon = Reconciler::new(&config);
/// assert!(recon.join().is_err());
///
/// let headers = &["company_number", "website", "sic_codes"];
/// recon.load(
///     Table::from_rows(headers, &[&["1", "www.acme.com", "A_1"]]),
///     Table::from_rows(headers, &[&["1", "acme.com", "A_2"]]),
/// );
/// recon.join().unwrap();
/// recon.match_websites().unwrap();
/// recon.match_sic().unwrap();
/// let summaries = recon.summaries().unwrap();
/// assert_eq!(summaries[0].website_matches, 1);
/// ```
#[derive(Debug)]
pub struct Reconciler<'a> {
    config: &'a ReconConfig,
    stage: Stage,
    internal_rows: usize,
    external_rows: usize,
}

impl<'a> Reconciler<'a> {
    pub fn new(config: &'a ReconConfig) -> Self {
        Self {
            config,
            stage: Stage::Empty,
            internal_rows: 0,
            external_rows: 0,
        }
    }

    /// Supplies both datasets, discarding any earlier stage output.
    pub fn load(&mut self, internal: Table, external: Table) {
        self.internal_rows = internal.len();
        self.external_rows = external.len();
        self.stage = Stage::Loaded { internal, external };
    }

    /// Joins the loaded datasets on registration number.
    ///
    /// The config is validated first, so a hand-built `ReconConfig` gets the
    /// same checks as one read from TOML.
    pub fn join(&mut self) -> Result<&JoinedSet, ReconError> {
        let Stage::Loaded { internal, external } = &self.stage else {
            return Err(ReconError::DataNotLoaded);
        };
        self.config.validate()?;
        let joined = join(
            internal,
            external,
            &self.config.columns,
            &self.config.join.collision_suffix,
        )?;
        info!(
            "Registration-number join: {} of {} internal records matched",
            joined.len(),
            self.internal_rows
        );
        self.stage = Stage::Joined(joined);
        match &self.stage {
            Stage::Joined(joined) => Ok(joined),
            _ => Err(ReconError::NotJoined),
        }
    }

    /// Adds the website flag to the joined records.
    pub fn match_websites(&mut self) -> Result<&WebsiteSet, ReconError> {
        let joined = match std::mem::take(&mut self.stage) {
            Stage::Joined(joined) => joined,
            other => {
                self.stage = other;
                return Err(ReconError::NotJoined);
            }
        };
        let annotated = annotate_website_match(joined);
        debug!(
            "Website matching: {} of {} records matched",
            annotated.records.iter().filter(|r| r.website_match).count(),
            annotated.records.len()
        );
        self.stage = Stage::WebsitesMatched(annotated);
        match &self.stage {
            Stage::WebsitesMatched(set) => Ok(set),
            _ => Err(ReconError::WebsitesNotMatched),
        }
    }

    /// Adds the exact and partial SIC flags to the website-annotated records.
    pub fn match_sic(&mut self) -> Result<&MatchedSet, ReconError> {
        let annotated = match std::mem::take(&mut self.stage) {
            Stage::WebsitesMatched(set) => set,
            other => {
                let err = match other {
                    Stage::Empty | Stage::Loaded { .. } => ReconError::NotJoined,
                    _ => ReconError::WebsitesNotMatched,
                };
                self.stage = other;
                return Err(err);
            }
        };
        let matched = annotate_sic_match(annotated, self.config.codes.delimiter);
        self.stage = Stage::Matched(matched);
        self.matched()
    }

    /// The fully matched records.
    pub fn matched(&self) -> Result<&MatchedSet, ReconError> {
        match &self.stage {
            Stage::Matched(set) => Ok(set),
            _ => Err(ReconError::NotMatched),
        }
    }

    /// Consumes the reconciler, returning the fully matched records.
    pub fn into_matched(self) -> Result<MatchedSet, ReconError> {
        match self.stage {
            Stage::Matched(set) => Ok(set),
            _ => Err(ReconError::NotMatched),
        }
    }

    /// Summary of one view over the matched records.
    pub fn summarize(&self, view: &ViewConfig) -> Result<Summary, ReconError> {
        let matched = self.matched()?;
        Ok(summarize(&matched.records, &view.label, |r| {
            view.filter.matches(&r.result)
        }))
    }

    /// Summaries of every configured view, in config order.
    pub fn summaries(&self) -> Result<Vec<Summary>, ReconError> {
        let matched = self.matched()?;
        Ok(summarize_views(&matched.records, &self.config.views))
    }

    pub fn internal_rows(&self) -> usize {
        self.internal_rows
    }

    pub fn external_rows(&self) -> usize {
        self.external_rows
    }
}

/// Outcome of a complete run over two in-memory datasets.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub internal_rows: usize,
    pub external_rows: usize,
    pub matched: MatchedSet,
    pub summaries: Vec<Summary>,
}

impl Reconciliation {
    pub fn anomalies(&self) -> &AnomalyStats {
        &self.matched.anomalies
    }
}

/// Runs every stage in order.
///
/// # Errors
///
/// `ReconError::ConfigValidation` when the config is invalid, and
/// `ReconError::MissingColumn` when a configured column is absent from
/// either dataset.
pub fn reconcile(
    config: &ReconConfig,
    internal: Table,
    external: Table,
) -> Result<Reconciliation, ReconError> {
    let mut recon = Reconciler::new(config);
    recon.load(internal, external);
    recon.join()?;
    recon.match_websites()?;
    recon.match_sic()?;
    let summaries = recon.summaries()?;
    let internal_rows = recon.internal_rows();
    let external_rows = recon.external_rows();
    Ok(Reconciliation {
        internal_rows,
        external_rows,
        matched: recon.into_matched()?,
        summaries,
    })
}
