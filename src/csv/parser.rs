//! CSV parsing.

use crate::types::{Row, Table};

/// Parse raw CSV text into a table.
///
/// Pure function: splits on line boundaries (tolerating both `\n` and
/// `\r\n`), skips lines that are empty after trimming, and splits each
/// line into fields on commas that fall outside double quotes.
///
/// Quote handling is a simple toggle: a `"` flips quoted mode and is not
/// emitted into the field. Doubled quotes (`""` inside a quoted field) are
/// NOT un-escaped; each one just flips the toggle twice. Field counts may
/// vary between rows; nothing is validated at parse time. Empty input
/// yields an empty table, which the caller treats as its own error case.
pub fn parse(text: &str) -> Table {
    let mut rows: Vec<Row> = Vec::new();

    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            continue;
        }
        rows.push(parse_line(line));
    }

    Table::new(rows)
}

/// Split one logical line into fields, honoring quoted commas.
fn parse_line(line: &str) -> Row {
    let mut fields: Row = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}
