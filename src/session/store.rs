//! In-memory session store for uploaded tables and their filter results.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::session::{FilterState, UploadState};
use crate::types::{DomainColumn, FilterStats, SessionStatusResponse, Table};
use crate::{DEFAULT_DOWNLOAD_NAME, FILTERED_PREFIX};

/// Result of a completed filter run.
#[derive(Debug, Clone)]
pub struct FilteredResult {
    /// The filtered table (header plus kept rows)
    pub table: Table,
    /// Serialized CSV text of the filtered table
    pub serialized: String,
    /// Statistics for this run
    pub stats: FilterStats,
    /// When the filter completed
    pub completed_at: DateTime<Utc>,
}

/// A single upload session.
///
/// Owns the immutable parsed table, the resolved domain column, the latest
/// filter result, and the two lifecycle state machines. Sessions only exist
/// for uploads that parsed and resolved successfully.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub session_id: Uuid,
    pub filename: Option<String>,
    pub table: Table,
    pub domain_column: DomainColumn,
    pub original_bytes: usize,
    pub filtered: Option<FilteredResult>,
    pub upload_state: UploadState,
    pub filter_state: FilterState,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl SessionRecord {
    /// Create a record for a successfully processed upload.
    pub fn new(
        filename: Option<String>,
        table: Table,
        domain_column: DomainColumn,
        original_bytes: usize,
    ) -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4(),
            filename,
            table,
            domain_column,
            original_bytes,
            filtered: None,
            upload_state: UploadState::Ready,
            filter_state: FilterState::Idle,
            created_at: now,
            last_activity: now,
        }
    }

    /// Begin a filter run, resetting a completed machine first.
    ///
    /// Returns `false` (and leaves the state untouched) on an illegal
    /// transition.
    pub fn begin_filter(&mut self) -> bool {
        if self.filter_state == FilterState::Complete {
            self.filter_state = FilterState::Idle;
        }
        if !self.filter_state.can_transition_to(FilterState::Applying) {
            warn!(
                session_id = %self.session_id,
                state = %self.filter_state,
                "Illegal filter state transition to applying"
            );
            return false;
        }
        self.filter_state = FilterState::Applying;
        self.touch();
        true
    }

    /// Store a completed filter result.
    pub fn complete_filter(&mut self, result: FilteredResult) -> bool {
        if !self.filter_state.can_transition_to(FilterState::Complete) {
            warn!(
                session_id = %self.session_id,
                state = %self.filter_state,
                "Illegal filter state transition to complete"
            );
            return false;
        }
        self.filter_state = FilterState::Complete;
        self.filtered = Some(result);
        self.touch();
        true
    }

    /// Abandon an in-flight filter run, leaving any prior result intact.
    pub fn abort_filter(&mut self) {
        if self.filter_state == FilterState::Applying {
            self.filter_state = match self.filtered {
                Some(_) => FilterState::Complete,
                None => FilterState::Idle,
            };
        }
    }

    /// Filename for the downloadable filtered CSV.
    pub fn download_name(&self) -> String {
        let base = self
            .filename
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_DOWNLOAD_NAME);
        format!("{}{}", FILTERED_PREFIX, base)
    }

    /// Convert to the status response shape.
    pub fn to_status_response(&self) -> SessionStatusResponse {
        SessionStatusResponse {
            session_id: self.session_id,
            filename: self.filename.clone(),
            upload_state: self.upload_state,
            filter_state: self.filter_state,
            total_rows: self.table.data_row_count(),
            original_bytes: self.original_bytes,
            stats: self.filtered.as_ref().map(|f| f.stats.clone()),
            created_at: self.created_at,
        }
    }

    fn touch(&mut self) {
        self.last_activity = Utc::now();
    }
}

/// In-memory store of upload sessions, keyed by session ID.
pub struct SessionStore {
    sessions: HashMap<Uuid, SessionRecord>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Insert a session and return its ID.
    pub fn insert(&mut self, record: SessionRecord) -> Uuid {
        let session_id = record.session_id;
        self.sessions.insert(session_id, record);
        session_id
    }

    /// Get a session by ID.
    pub fn get(&self, session_id: Uuid) -> Option<&SessionRecord> {
        self.sessions.get(&session_id)
    }

    /// Get a mutable reference to a session.
    pub fn get_mut(&mut self, session_id: Uuid) -> Option<&mut SessionRecord> {
        self.sessions.get_mut(&session_id)
    }

    /// Remove a session, returning whether it existed.
    pub fn remove(&mut self, session_id: Uuid) -> bool {
        self.sessions.remove(&session_id).is_some()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions idle for longer than `ttl_minutes`.
    pub fn cleanup_expired(&mut self, ttl_minutes: i64) {
        let cutoff = Utc::now() - chrono::Duration::minutes(ttl_minutes);
        self.sessions
            .retain(|_, session| session.last_activity > cutoff);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
