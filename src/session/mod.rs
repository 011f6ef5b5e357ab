//! Session tracking for uploaded tables and filter results.

mod state;
mod store;

pub use state::{FilterState, UploadState};
pub use store::{FilteredResult, SessionRecord, SessionStore};
