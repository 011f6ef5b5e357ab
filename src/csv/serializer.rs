//! CSV serialization and size accounting.

use std::fmt::Write;

use crate::error::FilterError;
use crate::types::Table;

/// Serialize a table back to CSV text.
///
/// Fields are joined with `,` and rows with `\n`. Fields are NOT re-quoted:
/// a field that was originally quoted to protect an embedded comma loses its
/// quoting on round-trip. This asymmetry with the parser is deliberate, kept
/// for output compatibility with the tool this service replaces.
pub fn serialize(table: &Table) -> Result<String, FilterError> {
    let mut out = String::new();

    for (i, row) in table.rows.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write!(out, "{}", row.join(","))
            .map_err(|e| FilterError::SerializationFailure(e.to_string()))?;
    }

    Ok(out)
}

/// UTF-8 encoded byte length of a text, as opposed to its character count.
pub fn byte_size(text: &str) -> usize {
    text.len()
}

/// Percentage size reduction, rounded to one decimal.
///
/// Defined as 0.0 when the original size is zero.
pub fn size_reduction_percent(original_bytes: usize, filtered_bytes: usize) -> f64 {
    if original_bytes == 0 {
        return 0.0;
    }
    let saved = original_bytes.saturating_sub(filtered_bytes) as f64;
    let percent = saved / original_bytes as f64 * 100.0;
    (percent * 10.0).round() / 10.0
}

/// Format a byte count in a human-readable form.
pub fn format_size(bytes: usize) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.2} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.2} TB", size)
}
