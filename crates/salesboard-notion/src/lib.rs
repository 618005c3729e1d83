//! salesboard-notion: Notion database source for salesboard.
//!
//! [`NotionClient`] implements [`salesboard_core::PageSource`] over HTTP so
//! the core pager can drive it. Authentication material is passed in by the
//! caller and only ever sent as request headers and the proxy body.

pub mod client;
pub mod wire;

pub use client::{ClientError, NotionClient};
