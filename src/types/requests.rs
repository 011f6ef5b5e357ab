//! Request and response definitions for the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::{FilterState, UploadState};

/// Request to upload a CSV file.
///
/// The file content travels as JSON text; the upload transport (file picker,
/// drag-and-drop) is the caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    /// Original filename, used to derive the download name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Raw CSV text
    pub content: String,
}

/// The resolved domain-bearing column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainColumn {
    /// Zero-based field index within each row
    pub index: usize,

    /// Header field that matched
    pub name: String,
}

/// Response after a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// ID of the created session
    pub session_id: Uuid,

    /// Filename the upload carried, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Number of data rows (header excluded)
    pub total_rows: usize,

    /// Number of header fields
    pub column_count: usize,

    /// Column the filter will match domains against
    pub domain_column: DomainColumn,

    /// Byte size of the uploaded text
    pub original_bytes: usize,
}

/// Request to apply a TLD filter to a session's table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterRequest {
    /// TLD identifiers to keep. Leading dots and mixed case are accepted
    /// and normalized before matching.
    pub tlds: Vec<String>,
}

/// Statistics for a completed filter run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterStats {
    /// Data rows in the original table (header excluded)
    pub total_rows: usize,

    /// Data rows kept by the filter
    pub kept_rows: usize,

    /// Data rows dropped by the filter
    pub rows_removed: usize,

    /// Byte size of the original upload
    pub original_bytes: usize,

    /// Byte size of the serialized filtered table
    pub filtered_bytes: usize,

    /// Bytes saved by filtering
    pub size_reduction_bytes: usize,

    /// Size reduction as a percentage, rounded to one decimal
    pub size_reduction_percent: f64,

    /// The normalized TLD selection that produced this result
    pub tlds: Vec<String>,
}

/// Response describing a session's current state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatusResponse {
    /// ID of the session
    pub session_id: Uuid,

    /// Filename the upload carried, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Upload lifecycle state
    pub upload_state: UploadState,

    /// Filter lifecycle state
    pub filter_state: FilterState,

    /// Number of data rows in the uploaded table
    pub total_rows: usize,

    /// Byte size of the uploaded text
    pub original_bytes: usize,

    /// Statistics from the most recent filter run, if one has completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<FilterStats>,

    /// When the session was created
    pub created_at: DateTime<Utc>,
}
