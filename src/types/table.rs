//! Table and row types for parsed CSV content.

use serde::{Deserialize, Serialize};

/// A single CSV row: an ordered sequence of string fields.
pub type Row = Vec<String>;

/// A parsed CSV table.
///
/// The first row, when present, is the header row naming each column.
/// Field counts may vary between rows; short rows are tolerated here and
/// dealt with at filter time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// All rows, header first
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a table from rows.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Create an empty table.
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    /// The header row, if the table has any rows.
    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// The data rows (everything after the header).
    pub fn data_rows(&self) -> &[Row] {
        if self.rows.is_empty() {
            &[]
        } else {
            &self.rows[1..]
        }
    }

    /// Number of data rows (header excluded).
    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Total number of rows including the header.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the table has no rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
