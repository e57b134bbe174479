//! Error types for the Borovkov facade.

use borovkov_core::CoreError;
use thiserror::Error;

/// Errors that can occur at the protocol boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// Construction error from the core.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Input is not JSON, or a record could not be rendered.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON is well-formed but not a record.
    #[error("malformed record: {field}: {reason}")]
    MalformedRecord { field: &'static str, reason: String },
}

impl Error {
    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!(field, reason = %reason, "rejected record");
        Error::MalformedRecord { field, reason }
    }
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, Error>;
