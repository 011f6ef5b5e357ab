//! TLD filter engine.

use std::collections::HashSet;

use crate::error::FilterError;
use crate::types::Table;

/// Normalize a raw TLD selection into bare lowercase tokens.
///
/// Accepts identifiers with or without a leading dot (`"com"`, `".COM"`);
/// trims whitespace, strips the dot, and lowercases. Tokens that are empty
/// after normalization are discarded.
pub fn normalize_selection(tlds: &[String]) -> HashSet<String> {
    tlds.iter()
        .map(|tld| tld.trim().trim_start_matches('.').to_lowercase())
        .filter(|tld| !tld.is_empty())
        .collect()
}

/// Filter a table's data rows to those whose domain field ends with one of
/// the selected TLDs.
///
/// The header row is retained unconditionally as the first row of the
/// result. Rows with fewer fields than `column_index + 1` are silently
/// dropped as malformed. The domain field is trimmed and lowercased before
/// the suffix comparison, so kept rows preserve their original casing.
/// The input table is not mutated.
///
/// Callers are expected to reject an empty selection before invoking the
/// engine, but an empty set still fails fast here rather than returning an
/// unfiltered or empty table.
pub fn filter_table(
    table: &Table,
    column_index: usize,
    selection: &HashSet<String>,
) -> Result<Table, FilterError> {
    if selection.is_empty() {
        return Err(FilterError::EmptySelection);
    }

    let header = table.header().ok_or(FilterError::EmptyFile)?;
    let suffixes: Vec<String> = selection.iter().map(|tld| format!(".{}", tld)).collect();

    let mut rows = Vec::with_capacity(table.row_count());
    rows.push(header.clone());

    for row in table.data_rows() {
        let Some(field) = row.get(column_index) else {
            continue;
        };
        let domain = field.trim().to_lowercase();
        if suffixes.iter().any(|suffix| domain.ends_with(suffix)) {
            rows.push(row.clone());
        }
    }

    Ok(Table::new(rows))
}
