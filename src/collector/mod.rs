//! Collector module for fetching and extracting topic tags
//!
//! This module contains the core collection logic, including:
//! - HTTP fetching with retry/backoff
//! - Topic tag extraction from result pages
//! - Sequential (page-at-a-time) collection
//! - Concurrent (overlapping requests) collection

mod concurrent;
mod extractor;
mod fetcher;
mod sequential;

pub use concurrent::collect_concurrent;
pub use extractor::extract_labels;
pub use fetcher::{build_http_client, fetch_page, PageRequest, RetryPolicy};
pub use sequential::collect_sequential;

use crate::Result;
use std::time::Duration;
use url::Url;

/// Execution strategy for a collection run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One page at a time; each fetch (including its retries) completes
    /// before the next page begins
    Sequential,

    /// Overlapping page fetches, bounded by a concurrency limit
    Concurrent,
}

/// Inputs for one collection run
///
/// All fields are read-only for the duration of the run; each run is
/// independent and shares no state with previous runs.
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Search endpoint, e.g. `https://github.com/search`
    pub base_url: Url,

    /// Search query text
    pub query: String,

    /// Number of result pages to collect (1-based pages, `1..=pages_count`)
    pub pages_count: u32,

    /// Base unit for retry backoff; the nth retry waits `timeout_unit * 2^(n-1)`
    pub timeout_unit: Duration,

    /// Attempts per page before a transient failure becomes terminal
    pub max_retries: u32,
}

impl CollectOptions {
    /// Returns the retry policy shared by every page in this run
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            timeout_unit: self.timeout_unit,
            max_retries: self.max_retries,
        }
    }
}

/// Collects topic tags across all requested pages with the given strategy
///
/// Builds one HTTP client for the run and dispatches to the sequential or
/// concurrent collector. For the sequential strategy the returned labels are
/// in page order; for the concurrent strategy pages are appended in
/// completion order, with label order preserved within each page. The total
/// label multiset is the same for both strategies when no fetch fails.
///
/// A terminal fetch failure on any page fails the whole run; no partial
/// label list is returned.
pub async fn collect_labels(opts: &CollectOptions, mode: Mode) -> Result<Vec<String>> {
    let client = build_http_client()?;

    match mode {
        Mode::Sequential => collect_sequential(&client, opts).await,
        Mode::Concurrent => collect_concurrent(&client, opts).await,
    }
}
