//! CSV export of matched records.
//!
//! One row per matched record: every joined column (minus configured drops)
//! followed by the three match flags as `true`/`false`.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;
use log::info;

use crate::config::{
    ViewFilter, PARTIAL_MATCH_COLUMN, SUB_SIC_MATCH_COLUMN, WEBSITE_MATCH_COLUMN,
};
use crate::matching::MatchedSet;

use super::pipe::open_output;

/// Appended to a flag column name while it clashes with a data column.
const FLAG_COLLISION_SUFFIX: &str = "_flag";

/// Writes the records selected by `filter` as CSV.
///
/// Columns named in `drop_columns` are left out; names that do not occur are
/// ignored. A flag column whose name is already taken by a data column gets
/// `_flag` appended until it is unique.
///
/// # Returns
///
/// The number of records written.
pub fn write_matched_csv<W: Write>(
    out: W,
    set: &MatchedSet,
    filter: ViewFilter,
    drop_columns: &[String],
) -> Result<usize> {
    let kept: Vec<usize> = set
        .headers
        .iter()
        .enumerate()
        .filter(|(_, name)| !drop_columns.contains(name))
        .map(|(index, _)| index)
        .collect();

    let mut writer = Writer::from_writer(out);

    let mut header: Vec<String> = kept.iter().map(|&i| set.headers[i].clone()).collect();
    for name in [WEBSITE_MATCH_COLUMN, SUB_SIC_MATCH_COLUMN, PARTIAL_MATCH_COLUMN] {
        let mut flag_name = name.to_string();
        while header.contains(&flag_name) {
            flag_name.push_str(FLAG_COLLISION_SUFFIX);
        }
        header.push(flag_name);
    }
    writer
        .write_record(&header)
        .context("Failed to write CSV header")?;

    let mut record_count = 0;
    for matched in set.records.iter().filter(|r| filter.matches(&r.result)) {
        let mut row: Vec<&str> = kept
            .iter()
            .map(|&i| matched.record.value(i).unwrap_or(""))
            .collect();
        row.extend([
            flag(matched.result.website_match),
            flag(matched.result.sub_sic_match),
            flag(matched.result.partial_match),
        ]);
        writer
            .write_record(&row)
            .with_context(|| format!("Failed to write record {}", matched.record.reg_number))?;
        record_count += 1;
    }

    writer.flush()?;
    Ok(record_count)
}

/// Writes the selected records to `path` (`-` for stdout).
pub fn export_csv(
    path: &Path,
    set: &MatchedSet,
    filter: ViewFilter,
    drop_columns: &[String],
) -> Result<usize> {
    let out = open_output(path)?;
    let count = write_matched_csv(out, set, filter, drop_columns)
        .with_context(|| format!("Failed to write CSV: {}", path.display()))?;
    info!("Wrote {} records to {}", count, path.display());
    Ok(count)
}

fn flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
