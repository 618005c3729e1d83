//! JSON bodies exchanged with the Notion query proxy.
//!
//! Responses decode straight into [`salesboard_core::Page`]; only the request
//! body and the proxy's error envelope live here.

use serde::{Deserialize, Serialize};

/// Body of `POST /databases/{id}/query`.
///
/// The proxy reads `apiKey` and forwards the remaining keys to Notion
/// unchanged.
#[derive(Debug, Serialize)]
pub struct QueryBody<'a> {
    #[serde(rename = "apiKey")]
    pub api_key: &'a str,
    pub page_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<&'a str>,
}

/// Error envelope returned by the proxy (and by Notion itself).
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Best human-readable message from an error response body.
pub fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ErrorBody {
            error: Some(error), ..
        })
        | Ok(ErrorBody {
            code: Some(error), ..
        }) => error,
        _ => String::from_utf8_lossy(body).trim().to_string(),
    }
}
