//! salesboard-core: record normalization pipeline for salesboard.
//!
//! This crate exposes the pipeline stages as public modules, plus the shared
//! types used across all of them. It performs no I/O of its own: the network
//! side is any [`pager::PageSource`] implementation.
//!
//! # Architecture
//!
//! ```text
//! Pager ──► Schema ──► Mapping ──► Extract ──► Normalize ──► Summary
//! ```
//!
//! Fetching is strictly sequential. Everything after the fetch is a pure,
//! per-record transformation.

pub mod config;
pub mod error;
pub mod extract;
pub mod mapping;
pub mod normalize;
pub mod pager;
pub mod pipeline;
pub mod schema;
pub mod summary;
pub mod types;

pub use error::{MappingError, PipelineError, TransportError};
pub use mapping::{FieldMapping, MappingOverrides};
pub use pager::{PageSource, Pager};
pub use pipeline::Pipeline;
pub use types::{
    CanonicalField, CanonicalRecord, Page, PageRequest, ProgressEvent, PropertyKind, RawRecord,
    RawValue, TypedProperty,
};
