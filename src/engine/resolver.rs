//! Domain column resolution.

use crate::types::Row;
use crate::DOMAIN_COLUMN_NAMES;

/// Find the domain-bearing column in a header row.
///
/// Matches each header field, trimmed and case-insensitively, against
/// `"name"` and `"domain"`. Returns the first matching index left to right,
/// or `None` when no field qualifies. The result is resolved once per upload
/// and never re-resolved after filtering.
pub fn resolve_domain_column(header: &Row) -> Option<usize> {
    header.iter().position(|field| {
        let field = field.trim();
        DOMAIN_COLUMN_NAMES
            .iter()
            .any(|name| field.eq_ignore_ascii_case(name))
    })
}
