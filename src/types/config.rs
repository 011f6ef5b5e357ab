//! Service configuration.

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_MAX_UPLOAD_SIZE, DEFAULT_SESSION_TTL_MINUTES};

/// Global service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Maximum accepted upload size in bytes
    pub max_upload_size: usize,

    /// Minutes a session is kept alive after its last filter run
    pub session_ttl_minutes: i64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            max_upload_size: std::env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE),
            session_ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SESSION_TTL_MINUTES),
        }
    }
}
