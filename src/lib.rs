//! salesboard: Notion sales database loader.
//!
//! Pulls every page of a database through the Notion query proxy, maps each
//! record onto the canonical sales schema and prints the result. The pipeline
//! itself lives in `salesboard-core`; this crate wires it to the HTTP client
//! and the command line so integration tests can drive a whole run.
//!
//! # Architecture
//!
//! ```text
//! NotionClient ──► Pager ──► Extract/Normalize ──► CanonicalRecord[] ──► report
//! ```

pub mod app;
pub mod report;

pub use app::{run, OutputFormat, RunOptions};
