//! CSV input loading.
//!
//! Cells are decoded lossily, so a stray non-UTF-8 byte in a partner feed
//! degrades one value instead of failing the load.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};

use super::{cell, Table};

/// Loads a CSV file with a header row into a `Table`.
pub fn load_table(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    let table = read_table(file)
        .with_context(|| format!("Failed to read CSV: {}", path.display()))?;
    info!(
        "Loaded {} rows ({} columns) from {}",
        table.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

/// Reads CSV data with a header row from any reader.
pub fn read_table<R: Read>(reader: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut headers: Vec<String> = reader
        .byte_headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_string())
        .collect();
    // Excel-exported CSVs start with a byte-order mark
    if let Some(first) = headers.first_mut() {
        *first = first.trim_start_matches('\u{feff}').to_string();
    }

    let mut table = Table::new(headers);
    for (line, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Malformed CSV record {}", line + 1))?;
        if record.len() != table.headers.len() {
            debug!(
                "Record {} has {} fields, expected {}",
                line + 1,
                record.len(),
                table.headers.len()
            );
        }
        table.push_row(
            record
                .iter()
                .map(|v| cell(&String::from_utf8_lossy(v)))
                .collect(),
        );
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_table_basic() {
        let csv = "\
company_number,website,sic_codes
123,http://www.acme.com,\"A_1,B_2\"
456,,
";
        let table = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["company_number", "website", "sic_codes"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][2].as_deref(), Some("A_1,B_2"));
        assert_eq!(table.rows[1], vec![Some("456".into()), None, None]);
    }

    #[test]
    fn test_read_table_strips_bom_and_header_whitespace() {
        let csv = "\u{feff}company_number , website\n1,a.com\n";
        let table = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["company_number", "website"]);
    }

    #[test]
    fn test_read_table_short_rows_padded() {
        let csv = "a,b,c\n1\n1,2,3,4\n";
        let table = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.rows[0], vec![Some("1".into()), None, None]);
        assert_eq!(table.rows[1].len(), 3);
    }

    #[test]
    fn test_read_table_invalid_utf8_is_lossy() {
        let mut data = b"a,b\n".to_vec();
        data.extend_from_slice(&[0x66, 0x6f, 0xff, b',', b'x', b'\n']);
        let table = read_table(data.as_slice()).unwrap();
        assert_eq!(table.rows[0][0].as_deref(), Some("fo\u{fffd}"));
        assert_eq!(table.rows[0][1].as_deref(), Some("x"));
    }

    #[test]
    fn test_load_table_missing_file() {
        let err = load_table(Path::new("/nonexistent/registry.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to open input file"));
    }

    #[test]
    fn test_load_table_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "company_number,website").unwrap();
        writeln!(file, "SC123,www.acme.co.uk").unwrap();
        let table = load_table(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0][0].as_deref(), Some("SC123"));
    }
}
