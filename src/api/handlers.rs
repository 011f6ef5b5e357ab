//! HTTP request handlers for the TLD filter service.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::csv::{byte_size, format_size, parse, serialize, size_reduction_percent};
use crate::engine::{filter_table, normalize_selection, resolve_domain_column};
use crate::error::FilterError;
use crate::session::{FilteredResult, SessionRecord, SessionStore, UploadState};
use crate::types::{
    DomainColumn, FilterRequest, FilterStats, ServiceConfig, SessionStatusResponse,
    UploadRequest, UploadResponse,
};

/// Application state shared across handlers.
pub struct AppState {
    pub store: RwLock<SessionStore>,
    pub config: ServiceConfig,
}

impl AppState {
    /// Create state with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            store: RwLock::new(SessionStore::new()),
            config,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Advance an upload state machine, logging illegal transitions.
fn advance(state: &mut UploadState, next: UploadState) {
    if state.can_transition_to(next) {
        *state = next;
    } else {
        warn!(from = %state, to = %next, "Illegal upload state transition");
    }
}

/// Upload a CSV file and create a session.
///
/// Parses the content, resolves the domain column, and stores the table.
/// Rejected uploads leave no partial state behind.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UploadRequest>,
) -> Result<Json<UploadResponse>, FilterError> {
    let mut upload_state = UploadState::Idle;
    advance(&mut upload_state, UploadState::Uploading);

    let content_bytes = byte_size(&request.content);
    if content_bytes > state.config.max_upload_size {
        advance(&mut upload_state, UploadState::Processing);
        advance(&mut upload_state, UploadState::Error);
        return Err(FilterError::ReadFailure(format!(
            "file too large: {} (max: {})",
            format_size(content_bytes),
            format_size(state.config.max_upload_size)
        )));
    }

    advance(&mut upload_state, UploadState::Processing);

    let table = parse(&request.content);
    if table.is_empty() {
        advance(&mut upload_state, UploadState::Error);
        return Err(FilterError::EmptyFile);
    }

    let header = table.header().cloned().unwrap_or_default();
    let Some(index) = resolve_domain_column(&header) else {
        advance(&mut upload_state, UploadState::Error);
        return Err(FilterError::MissingColumn);
    };
    let domain_column = DomainColumn {
        index,
        name: header[index].trim().to_string(),
    };

    advance(&mut upload_state, UploadState::Ready);

    let record = SessionRecord::new(
        request.filename.clone(),
        table,
        domain_column.clone(),
        content_bytes,
    );
    let total_rows = record.table.data_row_count();
    let column_count = header.len();

    let session_id = {
        let mut store = state.store.write().await;
        store.cleanup_expired(state.config.session_ttl_minutes);
        store.insert(record)
    };

    info!(
        %session_id,
        filename = request.filename.as_deref().unwrap_or("<none>"),
        rows = total_rows,
        size = %format_size(content_bytes),
        column = %domain_column.name,
        "Upload accepted"
    );

    Ok(Json(UploadResponse {
        session_id,
        filename: request.filename,
        total_rows,
        column_count,
        domain_column,
        original_bytes: content_bytes,
    }))
}

/// Apply a TLD filter to a session's table.
///
/// An empty (or all-blank) selection is rejected before the session is
/// touched, so any previous filter result survives unchanged.
pub async fn apply_filter(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<FilterRequest>,
) -> Result<Json<FilterStats>, FilterError> {
    let selection = normalize_selection(&request.tlds);
    if selection.is_empty() {
        return Err(FilterError::EmptySelection);
    }

    let mut store = state.store.write().await;
    let session = store
        .get_mut(session_id)
        .ok_or(FilterError::SessionNotFound)?;

    session.begin_filter();

    let filtered = filter_table(&session.table, session.domain_column.index, &selection)?;
    let serialized = match serialize(&filtered) {
        Ok(text) => text,
        Err(e) => {
            session.abort_filter();
            return Err(e);
        }
    };

    let filtered_bytes = byte_size(&serialized);
    let total_rows = session.table.data_row_count();
    let kept_rows = filtered.data_row_count();
    let mut tlds: Vec<String> = selection.into_iter().collect();
    tlds.sort();

    let stats = FilterStats {
        total_rows,
        kept_rows,
        rows_removed: total_rows - kept_rows,
        original_bytes: session.original_bytes,
        filtered_bytes,
        size_reduction_bytes: session.original_bytes.saturating_sub(filtered_bytes),
        size_reduction_percent: size_reduction_percent(session.original_bytes, filtered_bytes),
        tlds,
    };

    session.complete_filter(FilteredResult {
        table: filtered,
        serialized,
        stats: stats.clone(),
        completed_at: Utc::now(),
    });

    info!(
        %session_id,
        kept = kept_rows,
        removed = stats.rows_removed,
        filtered_size = %format_size(filtered_bytes),
        reduction_percent = stats.size_reduction_percent,
        "Filter applied"
    );

    Ok(Json(stats))
}

/// Get session status.
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionStatusResponse>, FilterError> {
    let store = state.store.read().await;
    let session = store.get(session_id).ok_or(FilterError::SessionNotFound)?;
    Ok(Json(session.to_status_response()))
}

/// Download the filtered CSV for a session.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, FilterError> {
    let store = state.store.read().await;
    let session = store.get(session_id).ok_or(FilterError::SessionNotFound)?;
    let filtered = session
        .filtered
        .as_ref()
        .ok_or(FilterError::FilterNotApplied)?;

    let headers = [
        (
            header::CONTENT_TYPE.as_str(),
            "text/csv; charset=utf-8".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION.as_str(),
            format!("attachment; filename=\"{}\"", session.download_name()),
        ),
    ];

    Ok((headers, filtered.serialized.clone()).into_response())
}

/// Delete a session.
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, FilterError> {
    let mut store = state.store.write().await;
    if store.remove(session_id) {
        info!(%session_id, "Session deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(FilterError::SessionNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(ServiceConfig::default()))
    }

    fn upload_request(filename: Option<&str>, content: &str) -> Json<UploadRequest> {
        Json(UploadRequest {
            filename: filename.map(String::from),
            content: content.to_string(),
        })
    }

    fn filter_request(tlds: &[&str]) -> Json<FilterRequest> {
        Json(FilterRequest {
            tlds: tlds.iter().map(|s| s.to_string()).collect(),
        })
    }

    async fn upload_sample(state: &Arc<AppState>) -> UploadResponse {
        upload(
            State(Arc::clone(state)),
            upload_request(
                Some("domains.csv"),
                "name,age\nalice.com,30\nbob.io,25\ncarol.COM,40\n",
            ),
        )
        .await
        .unwrap()
        .0
    }

    #[tokio::test]
    async fn test_upload_resolves_column_and_counts() {
        let state = test_state();
        let response = upload_sample(&state).await;

        assert_eq!(response.total_rows, 3);
        assert_eq!(response.column_count, 2);
        assert_eq!(response.domain_column.index, 0);
        assert_eq!(response.domain_column.name, "name");
    }

    #[tokio::test]
    async fn test_upload_empty_file_rejected() {
        let state = test_state();
        let err = upload(State(Arc::clone(&state)), upload_request(None, ""))
            .await
            .unwrap_err();
        assert_eq!(err, FilterError::EmptyFile);
        // No partial state retained.
        assert!(state.store.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_upload_missing_column_rejected() {
        let state = test_state();
        let err = upload(
            State(Arc::clone(&state)),
            upload_request(None, "email,x\na@b.com,1\n"),
        )
        .await
        .unwrap_err();
        assert_eq!(err, FilterError::MissingColumn);
        assert!(state.store.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_upload_oversize_rejected() {
        let state = Arc::new(AppState::new(ServiceConfig {
            max_upload_size: 8,
            ..ServiceConfig::default()
        }));
        let err = upload(
            State(Arc::clone(&state)),
            upload_request(None, "name\nalice.com\n"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, FilterError::ReadFailure(_)));
    }

    #[tokio::test]
    async fn test_filter_keeps_matching_rows() {
        let state = test_state();
        let uploaded = upload_sample(&state).await;

        let stats = apply_filter(
            State(Arc::clone(&state)),
            Path(uploaded.session_id),
            filter_request(&["com"]),
        )
        .await
        .unwrap()
        .0;

        assert_eq!(stats.total_rows, 3);
        assert_eq!(stats.kept_rows, 2);
        assert_eq!(stats.rows_removed, 1);
        assert!(stats.filtered_bytes <= stats.original_bytes);
        assert!(stats.size_reduction_percent > 0.0);

        let store = state.store.read().await;
        let filtered = store
            .get(uploaded.session_id)
            .unwrap()
            .filtered
            .as_ref()
            .unwrap();
        assert_eq!(
            filtered.serialized,
            "name,age\nalice.com,30\ncarol.COM,40"
        );
    }

    #[tokio::test]
    async fn test_filter_no_match_keeps_header_only() {
        let state = test_state();
        let uploaded = upload(
            State(Arc::clone(&state)),
            upload_request(None, "domain,score\nx.ai,5\n"),
        )
        .await
        .unwrap()
        .0;

        let stats = apply_filter(
            State(Arc::clone(&state)),
            Path(uploaded.session_id),
            filter_request(&["io"]),
        )
        .await
        .unwrap()
        .0;

        assert_eq!(stats.kept_rows, 0);
        assert!(stats.size_reduction_percent > 0.0);
    }

    #[tokio::test]
    async fn test_empty_selection_preserves_prior_result() {
        let state = test_state();
        let uploaded = upload_sample(&state).await;

        apply_filter(
            State(Arc::clone(&state)),
            Path(uploaded.session_id),
            filter_request(&["com"]),
        )
        .await
        .unwrap();

        let err = apply_filter(
            State(Arc::clone(&state)),
            Path(uploaded.session_id),
            filter_request(&[]),
        )
        .await
        .unwrap_err();
        assert_eq!(err, FilterError::EmptySelection);

        // Blank/dot-only tokens normalize away to the same rejection.
        let err = apply_filter(
            State(Arc::clone(&state)),
            Path(uploaded.session_id),
            filter_request(&["  ", "."]),
        )
        .await
        .unwrap_err();
        assert_eq!(err, FilterError::EmptySelection);

        let store = state.store.read().await;
        let session = store.get(uploaded.session_id).unwrap();
        let filtered = session.filtered.as_ref().unwrap();
        assert_eq!(filtered.stats.kept_rows, 2);
    }

    #[tokio::test]
    async fn test_dot_prefixed_and_mixed_case_selection() {
        let state = test_state();
        let uploaded = upload_sample(&state).await;

        let stats = apply_filter(
            State(Arc::clone(&state)),
            Path(uploaded.session_id),
            filter_request(&[".COM"]),
        )
        .await
        .unwrap()
        .0;
        assert_eq!(stats.kept_rows, 2);
        assert_eq!(stats.tlds, vec!["com"]);
    }

    #[tokio::test]
    async fn test_filter_unknown_session() {
        let state = test_state();
        let err = apply_filter(
            State(Arc::clone(&state)),
            Path(Uuid::new_v4()),
            filter_request(&["com"]),
        )
        .await
        .unwrap_err();
        assert_eq!(err, FilterError::SessionNotFound);
    }

    #[tokio::test]
    async fn test_session_status_reflects_filter() {
        let state = test_state();
        let uploaded = upload_sample(&state).await;

        let status = get_session(State(Arc::clone(&state)), Path(uploaded.session_id))
            .await
            .unwrap()
            .0;
        assert_eq!(status.upload_state, UploadState::Ready);
        assert_eq!(status.filter_state, crate::session::FilterState::Idle);
        assert!(status.stats.is_none());

        apply_filter(
            State(Arc::clone(&state)),
            Path(uploaded.session_id),
            filter_request(&["io"]),
        )
        .await
        .unwrap();

        let status = get_session(State(Arc::clone(&state)), Path(uploaded.session_id))
            .await
            .unwrap()
            .0;
        assert_eq!(status.filter_state, crate::session::FilterState::Complete);
        assert_eq!(status.stats.unwrap().kept_rows, 1);
    }

    #[tokio::test]
    async fn test_download_headers_and_ordering() {
        let state = test_state();
        let uploaded = upload_sample(&state).await;

        // Download before any filter run is rejected.
        let err = download(State(Arc::clone(&state)), Path(uploaded.session_id))
            .await
            .unwrap_err();
        assert_eq!(err, FilterError::FilterNotApplied);

        apply_filter(
            State(Arc::clone(&state)),
            Path(uploaded.session_id),
            filter_request(&["com"]),
        )
        .await
        .unwrap();

        let response = download(State(Arc::clone(&state)), Path(uploaded.session_id))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"filtered_domains.csv\""
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"name,age\nalice.com,30\ncarol.COM,40");
    }

    #[tokio::test]
    async fn test_delete_session() {
        let state = test_state();
        let uploaded = upload_sample(&state).await;

        let status = delete_session(State(Arc::clone(&state)), Path(uploaded.session_id))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let err = delete_session(State(Arc::clone(&state)), Path(uploaded.session_id))
            .await
            .unwrap_err();
        assert_eq!(err, FilterError::SessionNotFound);
    }

    #[tokio::test]
    async fn test_health() {
        let response = health_check().await.0;
        assert_eq!(response.status, "healthy");
    }
}
