//! Statistics printing.

use log::{info, warn};
use strum::IntoEnumIterator;

use crate::error_handling::{AnomalyStats, AnomalyType};
use crate::summary::Summary;

/// Logs one summary block per view.
pub fn print_summaries(summaries: &[Summary]) {
    for summary in summaries {
        info!("{}:", summary.label);
        info!("   Total records: {}", summary.total_records);
        info!(
            "   Website matches: {} ({:.2}%)",
            summary.website_matches, summary.website_match_rate
        );
        info!(
            "   Sub-SIC matches: {} ({:.2}%)",
            summary.sub_sic_matches, summary.sub_sic_match_rate
        );
        info!(
            "   Partial matches: {} ({:.2}%)",
            summary.partial_matches, summary.partial_match_rate
        );
    }
}

/// Logs the non-zero anomaly counts.
pub fn print_anomaly_statistics(anomalies: &AnomalyStats) {
    let total = anomalies.total();
    if total == 0 {
        return;
    }

    warn!("Anomaly Counts ({} total):", total);
    for anomaly in AnomalyType::iter() {
        let count = anomalies.get(anomaly);
        if count > 0 {
            warn!("   {}: {}", anomaly.as_str(), count);
        }
    }
}

/// Prints a simple one-line summary of the run.
pub fn print_simple_summary(
    internal_rows: usize,
    external_rows: usize,
    joined_records: usize,
    elapsed_seconds: f64,
) {
    info!(
        "✅ Reconciled {} internal and {} external record{} ({} joined) in {:.1}s",
        internal_rows,
        external_rows,
        if external_rows == 1 { "" } else { "s" },
        joined_records,
        elapsed_seconds
    );
}
