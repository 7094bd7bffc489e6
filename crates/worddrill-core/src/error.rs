//! Dataset fetch error types.
//!
//! These errors represent failures while retrieving the raw sheet export.
//! Defined in `worddrill-core` so callers of [`crate::ingest::load_dataset`]
//! can tell a transport failure apart from a dataset that simply decoded to
//! nothing.

use thiserror::Error;

/// Errors that can occur while fetching a dataset from its source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The source answered with a non-success status.
    #[error("failed to fetch data (HTTP {status}): {reason}")]
    Status { status: u16, reason: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// A local dataset file could not be read.
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// The response body was not valid UTF-8 text.
    #[error("dataset body is not valid text: {0}")]
    Decode(String),
}

impl FetchError {
    /// Returns `true` if re-invoking the fetch may succeed.
    ///
    /// Nothing retries automatically; this only informs the caller's
    /// "retry" affordance.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => *status >= 500 || *status == 429,
            FetchError::Timeout(_) | FetchError::Network(_) => true,
            FetchError::Io { .. } | FetchError::Decode(_) => false,
        }
    }
}
