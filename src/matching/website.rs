//! Website matcher.

use log::{debug, trace};

use crate::domain::normalize_domain;
use crate::error_handling::{AnomalyStats, AnomalyType};

use super::{present, JoinedSet, WebsiteRecord, WebsiteSet};

/// Canonical domain of a website cell.
///
/// A leading `www.` is removed before normalization so that a bare
/// `www.example.com` and `example.com` compare equal.
pub fn canonical_website(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let host = lowered.strip_prefix("www.").unwrap_or(&lowered);
    normalize_domain(host)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Match,
    Mismatch,
    Missing,
    EmptyDomain,
}

fn compare(internal: Option<&str>, external: Option<&str>) -> Comparison {
    let (Some(internal), Some(external)) = (present(internal), present(external)) else {
        return Comparison::Missing;
    };
    let internal = canonical_website(internal);
    let external = canonical_website(external);
    if internal.is_empty() || external.is_empty() {
        Comparison::EmptyDomain
    } else if internal == external {
        Comparison::Match
    } else {
        Comparison::Mismatch
    }
}

/// Whether two website cells name the same canonical domain.
///
/// Missing values and websites that normalize to nothing never match.
///
/// # Examples
///
/// ```
/// use company_match::matching::websites_match;
///
/// assert!(websites_match(Some("https://www.acme.com/about"), Some("acme.com")));
/// assert!(!websites_match(Some("acme.com"), None));
/// ```
pub fn websites_match(internal: Option<&str>, external: Option<&str>) -> bool {
    compare(internal, external) == Comparison::Match
}

/// Adds `website_match` to every joined record.
pub fn annotate_website_match(joined: JoinedSet) -> WebsiteSet {
    let JoinedSet {
        headers,
        layout,
        records,
        mut anomalies,
    } = joined;

    let records = records
        .into_iter()
        .map(|record| {
            let comparison = compare(
                record.value(layout.internal_website),
                record.value(layout.external_website),
            );
            match count(&mut anomalies, comparison) {
                Some(anomaly) => debug!("{}: {}", record.reg_number, anomaly),
                None => trace!("{}: website {:?}", record.reg_number, comparison),
            }
            WebsiteRecord {
                record,
                website_match: comparison == Comparison::Match,
            }
        })
        .collect();

    WebsiteSet {
        headers,
        layout,
        records,
        anomalies,
    }
}

fn count(anomalies: &mut AnomalyStats, comparison: Comparison) -> Option<AnomalyType> {
    let anomaly = match comparison {
        Comparison::Missing => AnomalyType::MissingWebsite,
        Comparison::EmptyDomain => AnomalyType::EmptyCanonicalDomain,
        Comparison::Match | Comparison::Mismatch => return None,
    };
    anomalies.increment(anomaly);
    Some(anomaly)
}
