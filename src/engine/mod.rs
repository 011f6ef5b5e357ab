//! Domain column resolution and TLD filtering.

mod filter;
mod resolver;

pub use filter::{filter_table, normalize_selection};
pub use resolver::resolve_domain_column;
