//! Pager: sequential cursor-driven retrieval of a whole collection.
//!
//! The loop is a fold over [`PagerState`]: each fetched [`Page`] is applied
//! with [`PagerState::advance`], which is pure and produces the next state and
//! a progress event. [`Pager`] only adds the network call and the fixed pause
//! between requests.
//!
//! ```text
//! (records, cursor) ──query──► Page ──advance──► (records', cursor', progress)
//! ```

use crate::config::PagerConfig;
use crate::error::{PipelineError, TransportError};
use crate::types::{Page, PageRequest, ProgressEvent, RawRecord};
use std::future::Future;
use std::time::Duration;

/// Remote API page-size ceiling.
pub const MAX_PAGE_SIZE: usize = 100;

/// Share of the progress range reserved for fetching.
pub const FETCH_PERCENT_CEILING: u8 = 90;

/// A paginated query capability.
pub trait PageSource {
    /// Fetch one page. The cursor in `request` is passed through verbatim.
    fn query(&self, request: PageRequest) -> impl Future<Output = Result<Page, TransportError>> + Send;
}

// ---------------------------------------------------------------------------
// Fold state
// ---------------------------------------------------------------------------

/// Accumulated state between page requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagerState {
    pub records: Vec<RawRecord>,
    /// Cursor for the next request; `None` before the first page.
    pub cursor: Option<String>,
    pub pages: usize,
    /// Estimated collection size, fixed after the first page.
    pub estimated_total: Option<usize>,
    pub done: bool,
}

impl PagerState {
    /// The request for the next page.
    pub fn next_request(&self, page_size: usize) -> PageRequest {
        PageRequest {
            cursor: self.cursor.clone(),
            page_size,
        }
    }

    /// Apply one fetched page.
    pub fn advance(mut self, page: Page, assumed_upper_bound: usize) -> (Self, ProgressEvent) {
        let page_len = page.records.len();
        self.pages += 1;
        self.records.extend(page.records);

        if self.estimated_total.is_none() {
            self.estimated_total = Some(if page.has_more {
                estimate_total(page_len, assumed_upper_bound)
            } else {
                self.records.len()
            });
        }

        self.cursor = page.next_cursor;
        self.done = !page.has_more;
        if page.has_more && self.cursor.is_none() {
            tracing::warn!(page = self.pages, "source reported more pages without a cursor; stopping");
            self.done = true;
        }

        let percent = fetch_percent(self.records.len(), self.estimated_total.unwrap_or(0));
        let event = ProgressEvent::new(
            percent,
            format!("Fetched page {} ({} records)", self.pages, self.records.len()),
        );
        (self, event)
    }
}

/// Estimate the collection size from the first page:
/// `first_page × ceil(upper_bound / first_page)`.
pub fn estimate_total(first_page_len: usize, assumed_upper_bound: usize) -> usize {
    if first_page_len == 0 {
        return assumed_upper_bound.max(1);
    }
    first_page_len * assumed_upper_bound.div_ceil(first_page_len).max(1)
}

/// Fetch progress, scaled into `0..=FETCH_PERCENT_CEILING`.
pub fn fetch_percent(accumulated: usize, estimated_total: usize) -> u8 {
    let ceiling = f64::from(FETCH_PERCENT_CEILING);
    if estimated_total == 0 {
        return FETCH_PERCENT_CEILING;
    }
    let percent = accumulated as f64 / estimated_total as f64 * ceiling;
    percent.min(ceiling).floor() as u8
}

// ---------------------------------------------------------------------------
// Pager
// ---------------------------------------------------------------------------

/// Drives a [`PageSource`] until it reports no more pages.
#[derive(Debug, Clone)]
pub struct Pager {
    page_size: usize,
    inter_page_delay: Duration,
    assumed_upper_bound: usize,
}

impl Pager {
    pub fn new(config: &PagerConfig) -> Self {
        Self {
            page_size: config.page_size.clamp(1, MAX_PAGE_SIZE),
            inter_page_delay: Duration::from_millis(config.inter_page_delay_ms),
            assumed_upper_bound: config.assumed_upper_bound.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetch every page and return the concatenated records, finishing with
    /// a 100% progress event.
    ///
    /// Any failed page aborts the whole fetch; nothing fetched so far is
    /// returned.
    pub async fn fetch_all<S, P>(&self, source: &S, mut on_progress: P) -> Result<Vec<RawRecord>, PipelineError>
    where
        S: PageSource,
        P: FnMut(ProgressEvent),
    {
        let records = self.fetch_pages(source, &mut on_progress).await?;
        on_progress(ProgressEvent::new(100, format!("Fetched {} records", records.len())));
        Ok(records)
    }

    /// The page loop without the completion event; progress stays within
    /// `0..=FETCH_PERCENT_CEILING`.
    pub async fn fetch_pages<S, P>(&self, source: &S, on_progress: &mut P) -> Result<Vec<RawRecord>, PipelineError>
    where
        S: PageSource,
        P: FnMut(ProgressEvent),
    {
        on_progress(ProgressEvent::new(0, "Requesting first page"));

        let mut state = PagerState::default();
        loop {
            if state.pages > 0 {
                tokio::time::sleep(self.inter_page_delay).await;
            }

            let page_number = state.pages + 1;
            let page = source
                .query(state.next_request(self.page_size))
                .await
                .map_err(|err| {
                    tracing::error!(page = page_number, error = %err, "page request failed");
                    PipelineError::Fetch {
                        page: page_number,
                        source: err,
                    }
                })?;

            let page_len = page.records.len();
            let has_more = page.has_more;
            let (next, event) = state.advance(page, self.assumed_upper_bound);
            state = next;

            tracing::info!(
                page = state.pages,
                records = page_len,
                accumulated = state.records.len(),
                has_more,
                percent = event.percent,
                "page completed"
            );
            on_progress(event);

            if state.done {
                break;
            }
        }

        Ok(state.records)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
