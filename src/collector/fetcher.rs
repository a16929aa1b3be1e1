//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the collector, including:
//! - Building the HTTP client
//! - GET requests for individual result pages
//! - Retry with exponential backoff on transient failures
//! - Error classification (transient vs terminal)

use crate::FetchError;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Fixed resource-type filter sent with every search request
const SEARCH_TYPE: &str = "Repositories";

/// Fixed sort key sent with every search request (popularity, descending)
const SEARCH_SORT: &str = "stars";

/// One page of search results to fetch
///
/// Constructed per page and never mutated. Page numbers are 1-based.
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// Search endpoint
    pub base_url: Url,

    /// Search query text
    pub query: String,

    /// 1-based page number
    pub page: u32,
}

/// Retry policy applied to one page fetch
///
/// The attempt counter lives inside `fetch_page`; nothing here is shared
/// between pages, so concurrent fetches cannot interfere with each other's
/// retry state.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Base unit for the backoff schedule
    pub timeout_unit: Duration,

    /// Total attempts before a transient failure becomes terminal (>= 1)
    pub max_retries: u32,
}

impl RetryPolicy {
    /// Returns the wait before retrying after failed attempt `attempt`
    ///
    /// The schedule is exponential: `timeout_unit * 2^(attempt-1)`, so waits
    /// strictly increase with the attempt number. Saturates rather than
    /// overflowing for absurdly large attempt counts.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.timeout_unit.saturating_mul(factor)
    }
}

/// Builds the HTTP client shared by all page fetches in a run
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("topic-tally/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one results page, retrying transient failures
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 200 | Return body |
/// | HTTP 429 | Retry with backoff |
/// | Connect error / timeout | Retry with backoff |
/// | Any other non-2xx | Fail immediately |
/// | Other request error | Fail immediately |
///
/// Attempts are numbered `1..=max_retries`; after failed attempt `n` the
/// task sleeps for `policy.backoff(n)` before trying again. When the last
/// attempt fails the error is surfaced as `RetriesExhausted`, naming the
/// page and the final failure.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `request` - The page to fetch
/// * `policy` - The retry policy for this fetch
///
/// # Returns
///
/// The response body on success, or a terminal `FetchError`.
pub async fn fetch_page(
    client: &Client,
    request: &PageRequest,
    policy: &RetryPolicy,
) -> Result<String, FetchError> {
    let page = request.page;
    let mut attempt = 1u32;

    loop {
        tracing::debug!("Page {} request (attempt {})", page, attempt);

        let last_failure = match send_request(client, request).await {
            Ok(body) => return Ok(body),
            Err(Transient::RateLimited) => {
                tracing::debug!("Page {} rate limited (429)", page);
                format!("status {}", StatusCode::TOO_MANY_REQUESTS.as_u16())
            }
            Err(Transient::Connection(e)) => {
                tracing::debug!("Page {} connection failure: {}", page, e);
                e.to_string()
            }
            Err(Transient::Terminal(e)) => return Err(e),
        };

        if attempt >= policy.max_retries {
            return Err(FetchError::RetriesExhausted {
                page,
                attempts: attempt,
                last: last_failure,
            });
        }

        let wait = policy.backoff(attempt);
        tracing::debug!("Page {} backing off {:?} before retry", page, wait);
        tokio::time::sleep(wait).await;
        attempt += 1;
    }
}

/// Classification of a single attempt's failure
enum Transient {
    /// HTTP 429, retryable
    RateLimited,

    /// Connection-level failure (refused, reset, timeout), retryable
    Connection(reqwest::Error),

    /// Not retryable; surfaced as-is
    Terminal(FetchError),
}

/// Sends one GET for the page and classifies the outcome
async fn send_request(client: &Client, request: &PageRequest) -> Result<String, Transient> {
    let page = request.page;

    let response = client
        .get(request.base_url.clone())
        .query(&[
            ("p", request.page.to_string().as_str()),
            ("q", request.query.as_str()),
            ("type", SEARCH_TYPE),
            ("s", SEARCH_SORT),
        ])
        .send()
        .await
        .map_err(|e| classify_send_error(page, e))?;

    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(Transient::RateLimited);
    }

    if !status.is_success() {
        return Err(Transient::Terminal(FetchError::Status {
            page,
            status: status.as_u16(),
        }));
    }

    // Body is treated as markup text regardless of content-type
    response
        .text()
        .await
        .map_err(|e| classify_send_error(page, e))
}

/// Maps a reqwest error to retryable or terminal
fn classify_send_error(page: u32, e: reqwest::Error) -> Transient {
    if e.is_connect() || e.is_timeout() {
        Transient::Connection(e)
    } else {
        Transient::Terminal(FetchError::Http { page, source: e })
    }
}
