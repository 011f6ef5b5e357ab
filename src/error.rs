//! Error types for upload and filter operations.
//!
//! Every failure a caller can trigger maps to a distinct category with a
//! stable wire identifier, so clients can branch on the kind while still
//! showing the human-readable message.

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the upload/filter pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The uploaded CSV parsed to zero rows.
    #[error("the CSV file is empty or contains no data")]
    EmptyFile,

    /// No header field matched "name" or "domain".
    #[error("CSV file must contain a column named \"name\" or \"domain\"")]
    MissingColumn,

    /// A filter was requested with no TLDs selected.
    #[error("no TLD extensions specified")]
    EmptySelection,

    /// The upload could not be accepted as text.
    #[error("failed to read uploaded file: {0}")]
    ReadFailure(String),

    /// Building the filtered output failed.
    #[error("failed to serialize filtered table: {0}")]
    SerializationFailure(String),

    /// The referenced session does not exist (or has expired).
    #[error("session not found")]
    SessionNotFound,

    /// Download was requested before any filter completed.
    #[error("no filter has been applied to this session yet")]
    FilterNotApplied,
}

impl FilterError {
    /// Stable identifier for the error category.
    pub fn kind(&self) -> &'static str {
        match self {
            FilterError::EmptyFile => "empty_file",
            FilterError::MissingColumn => "missing_column",
            FilterError::EmptySelection => "empty_selection",
            FilterError::ReadFailure(_) => "read_failure",
            FilterError::SerializationFailure(_) => "serialization_failure",
            FilterError::SessionNotFound => "session_not_found",
            FilterError::FilterNotApplied => "filter_not_applied",
        }
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            FilterError::EmptyFile
            | FilterError::MissingColumn
            | FilterError::EmptySelection
            | FilterError::ReadFailure(_) => StatusCode::BAD_REQUEST,
            FilterError::SessionNotFound => StatusCode::NOT_FOUND,
            FilterError::FilterNotApplied => StatusCode::CONFLICT,
            FilterError::SerializationFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FilterError {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "error": self.kind(),
            "message": self.to_string(),
        });
        (self.status_code(), Json(body)).into_response()
    }
}
