//! Error taxonomy for the extraction and summarization engine.
//!
//! Failure isolation is the central invariant: errors here describe what went
//! wrong for a single URL or a single model call, and the pipeline converts
//! every one of them into a [`crate::models::SummaryResult`] with its `error`
//! field set. Nothing in this crate aborts a batch because one item failed.
//!
//! Extraction deliberately has no error variant. It is a total function that
//! degrades per-field to placeholder values instead of failing.

use thiserror::Error;

/// Errors produced by the engine's fallible stages.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The caller supplied a URL list with no usable entries.
    #[error("no valid URLs in request")]
    Validation,

    /// Building the shared HTTP client failed.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    /// A network or transport failure while fetching one URL.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but not with a 2xx status.
    #[error("unexpected status {status} fetching {url}")]
    FetchStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The summarization model call failed.
    #[error("summarization model call failed: {0}")]
    Model(String),

    /// A configuration file could not be read or parsed.
    #[error("invalid config {path}: {message}")]
    Config { path: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}
