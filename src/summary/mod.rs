//! Summary aggregation.
//!
//! Counts and percentage rates of the three match flags over a filtered
//! subset of matched records.

use serde::Serialize;

use crate::config::ViewConfig;
use crate::matching::MatchedRecord;

/// Match counts and rates for one labeled subset.
///
/// Rates are percentages of `total_records` and are `0.0` for an empty subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub label: String,
    pub total_records: usize,
    pub website_matches: usize,
    pub website_match_rate: f64,
    pub sub_sic_matches: usize,
    pub sub_sic_match_rate: f64,
    pub partial_matches: usize,
    pub partial_match_rate: f64,
}

/// `count` as a percentage of `total`; `0.0` when `total` is zero.
pub fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Summarizes the records selected by `filter`.
///
/// # Examples
///
/// ```
/// use company_match::summary::summarize;
///
/// let summary = summarize(&[], "Nothing", |_| true);
/// assert_eq!(summary.total_records, 0);
/// assert_eq!(summary.website_match_rate, 0.0);
/// ```
pub fn summarize<F>(records: &[MatchedRecord], label: &str, filter: F) -> Summary
where
    F: Fn(&MatchedRecord) -> bool,
{
    let mut total = 0;
    let mut website = 0;
    let mut sub_sic = 0;
    let mut partial = 0;
    for record in records.iter().filter(|r| filter(r)) {
        total += 1;
        website += usize::from(record.result.website_match);
        sub_sic += usize::from(record.result.sub_sic_match);
        partial += usize::from(record.result.partial_match);
    }

    Summary {
        label: label.to_string(),
        total_records: total,
        website_matches: website,
        website_match_rate: rate(website, total),
        sub_sic_matches: sub_sic,
        sub_sic_match_rate: rate(sub_sic, total),
        partial_matches: partial,
        partial_match_rate: rate(partial, total),
    }
}

/// One summary per configured view, in view order.
pub fn summarize_views(records: &[MatchedRecord], views: &[ViewConfig]) -> Vec<Summary> {
    views
        .iter()
        .map(|view| summarize(records, &view.label, |r| view.filter.matches(&r.result)))
        .collect()
}
