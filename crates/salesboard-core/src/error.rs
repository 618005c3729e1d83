//! Error types for the pipeline.
//!
//! Only transport failures are fatal. Schema irregularities found during
//! extraction and normalization are recovered in place and never show up here.

use thiserror::Error;

/// A single page request failed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The source answered with a non-success status.
    #[error("source returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never produced a response (connect, IO, protocol).
    #[error("request failed: {0}")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The response body was not a valid page envelope.
    #[error("malformed page response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure of a whole [`run`](crate::pipeline::Pipeline::run) or
/// [`fetch_all`](crate::pager::Pager::fetch_all) call.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("fetching page {page} failed")]
    Fetch {
        page: usize,
        #[source]
        source: TransportError,
    },
}

/// Invalid user-supplied field mapping.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("unknown canonical field {0:?}")]
    UnknownField(String),

    #[error("mapping {0:?} is not of the form field=Property")]
    Malformed(String),

    #[error("mapping for {0} names an empty property")]
    EmptyProperty(String),
}
