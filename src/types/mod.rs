//! Core type definitions.

mod config;
mod requests;
mod table;

pub use config::ServiceConfig;
pub use requests::{
    DomainColumn, FilterRequest, FilterStats, SessionStatusResponse, UploadRequest,
    UploadResponse,
};
pub use table::{Row, Table};
