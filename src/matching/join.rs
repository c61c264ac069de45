//! Registration-number join.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::config::ColumnsConfig;
use crate::error_handling::{AnomalyStats, AnomalyType, ReconError, Side};
use crate::records::Table;

use super::{JoinedRecord, JoinedSet, Layout};

/// Canonical form of a registration number: no whitespace, upper-case.
///
/// `" sc 012345 "` and `"SC012345"` are the same company.
pub fn normalize_reg_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Inner-joins the two datasets on normalized registration number.
///
/// Output rows follow internal input order. Columns are every internal column
/// followed by every external column except the external key; an external
/// header that collides with an existing one gets `collision_suffix` appended
/// until it is unique.
///
/// Each key appears at most once in the output: when a key repeats within a
/// dataset the first row wins and the repeats are counted as anomalies. Rows
/// with a blank key never join.
///
/// # Errors
///
/// `ReconError::MissingColumn` when a configured column is absent, and
/// `ReconError::ConfigValidation` when `collision_suffix` is empty or an
/// external website or codes column is the external key.
pub fn join(
    internal: &Table,
    external: &Table,
    columns: &ColumnsConfig,
    collision_suffix: &str,
) -> Result<JoinedSet, ReconError> {
    if collision_suffix.is_empty() {
        return Err(ReconError::ConfigValidation(
            "join.collision_suffix must not be empty".into(),
        ));
    }
    let ic = &columns.internal;
    let ec = &columns.external;

    let internal_key = internal.column_index(&ic.reg_number, Side::Internal)?;
    let internal_website = internal.column_index(&ic.website, Side::Internal)?;
    let internal_codes = internal.column_index(&ic.codes, Side::Internal)?;
    let internal_name = ic.name.as_deref().and_then(|name| {
        let found = internal.find_column(name);
        if found.is_none() {
            debug!("Internal name column '{name}' not present; skipping");
        }
        found
    });
    let external_key = external.column_index(&ec.reg_number, Side::External)?;
    let external_website = external.column_index(&ec.website, Side::External)?;
    let external_codes = external.column_index(&ec.codes, Side::External)?;

    // Output headers: internal as-is, then external minus its key, de-collided
    let mut headers = internal.headers.clone();
    let mut taken: HashSet<String> = headers.iter().cloned().collect();
    let mut carried = Vec::with_capacity(external.headers.len());
    for (index, name) in external.headers.iter().enumerate() {
        if index == external_key {
            continue;
        }
        let mut output_name = name.clone();
        while taken.contains(&output_name) {
            output_name.push_str(collision_suffix);
        }
        taken.insert(output_name.clone());
        carried.push(index);
        headers.push(output_name);
    }

    let external_position = |key: &str, column: usize| {
        carried
            .iter()
            .position(|&c| c == column)
            .map(|offset| internal.headers.len() + offset)
            .ok_or_else(|| {
                ReconError::ConfigValidation(format!(
                    "{key} must differ from columns.external.reg_number"
                ))
            })
    };
    let layout = Layout {
        internal_reg_number: internal_key,
        internal_website,
        internal_codes,
        internal_name,
        external_website: external_position("columns.external.website", external_website)?,
        external_codes: external_position("columns.external.codes", external_codes)?,
    };

    let mut anomalies = AnomalyStats::new();

    let mut external_rows: HashMap<String, usize> = HashMap::with_capacity(external.len());
    for (row_index, row) in external.rows.iter().enumerate() {
        let key = row_key(row, external_key);
        if key.is_empty() {
            debug!("External row {} has a blank registration number", row_index + 1);
            anomalies.increment(AnomalyType::BlankRegNumber);
            continue;
        }
        if external_rows.contains_key(&key) {
            warn!("Duplicate external registration number {key}; keeping first row");
            anomalies.increment(AnomalyType::DuplicateExternalRegNumber);
            continue;
        }
        external_rows.insert(key, row_index);
    }

    let mut seen_internal: HashSet<String> = HashSet::with_capacity(internal.len());
    let mut records = Vec::new();
    for (row_index, row) in internal.rows.iter().enumerate() {
        let key = row_key(row, internal_key);
        if key.is_empty() {
            debug!("Internal row {} has a blank registration number", row_index + 1);
            anomalies.increment(AnomalyType::BlankRegNumber);
            continue;
        }
        if !seen_internal.insert(key.clone()) {
            warn!("Duplicate internal registration number {key}; keeping first row");
            anomalies.increment(AnomalyType::DuplicateInternalRegNumber);
            continue;
        }
        let Some(&external_index) = external_rows.get(&key) else {
            continue;
        };
        let external_row = &external.rows[external_index];

        let mut values = row.clone();
        values.resize(internal.headers.len(), None);
        values.extend(
            carried
                .iter()
                .map(|&column| external_row.get(column).cloned().flatten()),
        );
        records.push(JoinedRecord {
            reg_number: key,
            values,
        });
    }

    debug!(
        "Joined {} of {} internal rows against {} external rows",
        records.len(),
        internal.len(),
        external.len()
    );

    Ok(JoinedSet {
        headers,
        layout,
        records,
        anomalies,
    })
}

fn row_key(row: &[Option<String>], column: usize) -> String {
    row.get(column)
        .and_then(|v| v.as_deref())
        .map(normalize_reg_number)
        .unwrap_or_default()
}
