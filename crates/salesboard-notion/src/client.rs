//! Notion database query client.
//!
//! Talks plain HTTP/1.1 to a proxy that forwards to `api.notion.com` and
//! terminates TLS there. One [`NotionClient`] serves one database; each
//! [`PageSource::query`] call is one `POST {base}/databases/{id}/query`.

use crate::wire::{error_message, QueryBody};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{header, Method, Request, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use salesboard_core::config::SourceConfig;
use salesboard_core::{Page, PageRequest, PageSource, TransportError};
use std::time::Duration;
use thiserror::Error;

/// Invalid client configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("no database id configured (set [source].database_id or pass --database-id)")]
    MissingDatabaseId,

    #[error("no Notion API key (pass --api-key or set NOTION_API_KEY)")]
    MissingApiKey,

    #[error("invalid query URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("only plain http:// proxy URLs are supported, got {0:?}")]
    UnsupportedScheme(String),
}

/// Paginated query access to one Notion database.
pub struct NotionClient {
    http: Client<HttpConnector, Full<Bytes>>,
    query_uri: Uri,
    api_key: String,
    notion_version: String,
    timeout: Duration,
}

impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient")
            .field("query_uri", &self.query_uri)
            .field("notion_version", &self.notion_version)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl NotionClient {
    pub fn new(config: &SourceConfig, api_key: impl Into<String>) -> Result<Self, ClientError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ClientError::MissingApiKey);
        }
        let database_id = config.database_id.trim();
        if database_id.is_empty() {
            return Err(ClientError::MissingDatabaseId);
        }

        let url = query_url(&config.base_url, database_id);
        let query_uri = url.parse::<Uri>().map_err(|e| ClientError::InvalidUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        if query_uri.scheme_str() != Some("http") {
            return Err(ClientError::UnsupportedScheme(url));
        }

        Ok(Self {
            http: Client::builder(TokioExecutor::new()).build_http(),
            query_uri,
            api_key,
            notion_version: config.notion_version.clone(),
            timeout: Duration::from_millis(config.request_timeout_ms.max(1)),
        })
    }

    pub fn query_uri(&self) -> &Uri {
        &self.query_uri
    }

    fn build_request(&self, request: &PageRequest) -> Result<Request<Full<Bytes>>, TransportError> {
        let body = serde_json::to_vec(&QueryBody {
            api_key: &self.api_key,
            page_size: request.page_size,
            start_cursor: request.cursor.as_deref(),
        })?;

        Request::builder()
            .method(Method::POST)
            .uri(self.query_uri.clone())
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header("Notion-Version", self.notion_version.as_str())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))
            .map_err(|e| TransportError::Request(Box::new(e)))
    }

    async fn send(&self, request: Request<Full<Bytes>>) -> Result<Page, TransportError> {
        let response = self
            .http
            .request(request)
            .await
            .map_err(|e| TransportError::Request(Box::new(e)))?;
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| TransportError::Request(Box::new(e)))?
            .to_bytes();

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(serde_json::from_slice::<Page>(&body)?)
    }
}

impl PageSource for NotionClient {
    async fn query(&self, request: PageRequest) -> Result<Page, TransportError> {
        tracing::debug!(
            uri = %self.query_uri,
            page_size = request.page_size,
            first_page = request.cursor.is_none(),
            "querying database"
        );
        let http_request = self.build_request(&request)?;
        tokio::time::timeout(self.timeout, self.send(http_request))
            .await
            .map_err(|_| TransportError::Timeout(self.timeout))?
    }
}

fn query_url(base_url: &str, database_id: &str) -> String {
    format!(
        "{}/databases/{}/query",
        base_url.trim().trim_end_matches('/'),
        database_id
    )
}
