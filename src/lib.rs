//! TLD Filter Service Library
//!
//! An in-memory CSV filtering service for domain lists. Uploads are parsed
//! into tables, the domain-bearing column is resolved from the header, and
//! callers apply an inclusive top-level-domain filter and download the result.

pub mod api;
pub mod csv;
pub mod engine;
pub mod error;
pub mod session;
pub mod types;

pub use csv::{parse, serialize};
pub use engine::{filter_table, normalize_selection, resolve_domain_column};
pub use error::FilterError;
pub use session::{FilterState, SessionStore, UploadState};
pub use types::{Row, ServiceConfig, Table};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::csv::*;
    pub use crate::engine::*;
    pub use crate::error::FilterError;
    pub use crate::session::*;
    pub use crate::types::*;
}

/// Header names recognized as the domain column (matched case-insensitively).
pub const DOMAIN_COLUMN_NAMES: [&str; 2] = ["name", "domain"];

/// Maximum upload size in bytes (10MB)
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Default session time-to-live in minutes
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 60;

/// Download filename used when the upload carried no filename
pub const DEFAULT_DOWNLOAD_NAME: &str = "domains.csv";

/// Prefix applied to download filenames
pub const FILTERED_PREFIX: &str = "filtered_";
