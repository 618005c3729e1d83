//! Shared test utilities for salesboard integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Nothing here touches the real network; paging delays
//! are deterministic under `tokio::time::pause()`.

#![allow(dead_code)]

pub mod assertions;
pub mod builders;
pub mod fake_notion_api;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use scripted_source::*;
