//! CSV parsing and serialization.

mod parser;
mod serializer;

pub use parser::parse;
pub use serializer::{byte_size, format_size, serialize, size_reduction_percent};
