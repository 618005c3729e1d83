//! Fake Notion query proxy for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves:
//! - `POST /databases/{database_id}/query`: scripted page bodies keyed by
//!   the `start_cursor` of the request body
//!
//! Every request body and header set is recorded so tests can check what the
//! client sent.
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakeNotionApi::start().await.unwrap();
//! api.serve_page(None, PAGE_KOREAN_1).await;
//! api.serve_page(Some("cursor-page-2"), PAGE_KOREAN_2).await;
//!
//! // Point the client at api.base_url()
//! ```

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// One request as seen by the server.
#[derive(Debug, Clone)]
pub struct RecordedQuery {
    pub database_id: String,
    pub authorization: Option<String>,
    pub notion_version: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Default)]
struct ApiState {
    /// Raw JSON page bodies keyed by the cursor that requests them.
    pages: HashMap<Option<String>, String>,
    /// When set, every request is answered with this status and body.
    failure: Option<(StatusCode, String)>,
    queries: Vec<RecordedQuery>,
}

/// Handle to the running fake proxy.
pub struct FakeNotionApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeNotionApi {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/databases/{database_id}/query", post(query_database))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL to put in `[source].base_url` (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer requests carrying `cursor` (or none, for the first page) with
    /// `body`.
    pub async fn serve_page(&self, cursor: Option<&str>, body: &str) {
        let mut state = self.state.lock().await;
        state.pages.insert(cursor.map(str::to_string), body.to_string());
    }

    /// Fail every subsequent request with `status` and a JSON error body.
    pub async fn fail_with(&self, status: u16, message: &str) {
        let body = serde_json::json!({ "error": message }).to_string();
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.state.lock().await.failure = Some((status, body));
    }

    /// Every query received so far, in order.
    pub async fn queries(&self) -> Vec<RecordedQuery> {
        self.state.lock().await.queries.clone()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn query_database(
    Path(database_id): Path<String>,
    State(state): State<Arc<Mutex<ApiState>>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let cursor = body
        .get("start_cursor")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    let mut state = state.lock().await;
    state.queries.push(RecordedQuery {
        database_id,
        authorization: header("authorization"),
        notion_version: header("notion-version"),
        body,
    });

    if let Some((status, body)) = &state.failure {
        return (*status, body.clone());
    }
    match state.pages.get(&cursor) {
        Some(page) => (StatusCode::OK, page.clone()),
        None => (
            StatusCode::NOT_FOUND,
            serde_json::json!({ "error": format!("no page scripted for cursor {cursor:?}") })
                .to_string(),
        ),
    }
}
