//! Upload and filter lifecycle state machines.
//!
//! Two independent enumerations, each with a validated transition table.
//! `Error` and `Complete` only go back to `Idle` through an explicit reset
//! (session delete / re-upload / re-apply).

use serde::{Deserialize, Serialize};

/// Lifecycle of an upload: `Idle → Uploading → Processing → {Ready | Error}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadState {
    /// No upload in flight
    Idle,
    /// Content is being received
    Uploading,
    /// Content is being parsed and the domain column resolved
    Processing,
    /// Table parsed, ready for filtering
    Ready,
    /// Upload was rejected
    Error,
}

impl UploadState {
    /// Whether moving to `next` is a legal transition.
    pub fn can_transition_to(self, next: UploadState) -> bool {
        matches!(
            (self, next),
            (UploadState::Idle, UploadState::Uploading)
                | (UploadState::Uploading, UploadState::Processing)
                | (UploadState::Processing, UploadState::Ready)
                | (UploadState::Processing, UploadState::Error)
                | (UploadState::Error, UploadState::Idle)
        )
    }
}

impl std::fmt::Display for UploadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadState::Idle => write!(f, "idle"),
            UploadState::Uploading => write!(f, "uploading"),
            UploadState::Processing => write!(f, "processing"),
            UploadState::Ready => write!(f, "ready"),
            UploadState::Error => write!(f, "error"),
        }
    }
}

/// Lifecycle of a filter run: `Idle → Applying → Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterState {
    /// No filter applied yet (or reset for a re-run)
    Idle,
    /// Filter is running
    Applying,
    /// Filter finished; a filtered table is available
    Complete,
}

impl FilterState {
    /// Whether moving to `next` is a legal transition.
    pub fn can_transition_to(self, next: FilterState) -> bool {
        matches!(
            (self, next),
            (FilterState::Idle, FilterState::Applying)
                | (FilterState::Applying, FilterState::Complete)
                | (FilterState::Complete, FilterState::Idle)
        )
    }
}

impl std::fmt::Display for FilterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterState::Idle => write!(f, "idle"),
            FilterState::Applying => write!(f, "applying"),
            FilterState::Complete => write!(f, "complete"),
        }
    }
}
