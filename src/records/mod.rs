//! Tabular record sets.
//!
//! A `Table` is what the input loader hands to the pipeline: header names and
//! rows of optional text cells, with blank cells already turned into `None`.

mod load;

pub use load::{load_table, read_table};

use crate::error_handling::{ReconError, Side};

/// Header names plus rows of optional text cells.
///
/// Every row has exactly `headers.len()` cells; `push_row` pads or truncates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Builds a table from string literals. Empty strings become `None`.
    pub fn from_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
        let mut table = Self::new(headers.iter().map(|h| h.to_string()).collect());
        for row in rows {
            table.push_row(row.iter().map(|v| cell(v)).collect());
        }
        table
    }

    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.headers.len(), None);
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a header, if present.
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Position of a required header.
    pub fn column_index(&self, name: &str, side: Side) -> Result<usize, ReconError> {
        self.find_column(name).ok_or_else(|| ReconError::MissingColumn {
            side,
            column: name.to_string(),
        })
    }
}

/// Blank or whitespace-only text is a missing value.
pub fn cell(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
