//! Topic-Tally: topic tag frequency analysis for paginated search results
//!
//! This crate fetches pages of search results from a remote site, extracts the
//! topic tags embedded in each page, and ranks tags by how often they appear.
//! Pages can be collected one at a time or with overlapping requests; both
//! strategies produce the same tag multiset for the same inputs.

pub mod aggregate;
pub mod collector;

use thiserror::Error;

/// Errors produced while fetching a single results page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for page {page}: {source}")]
    Http { page: u32, source: reqwest::Error },

    #[error("page {page} returned status {status}")]
    Status { page: u32, status: u16 },

    #[error("page {page} still failing after {attempts} attempts: {last}")]
    RetriesExhausted {
        page: u32,
        attempts: u32,
        last: String,
    },
}

/// Errors produced by a collection run
#[derive(Debug, Error)]
pub enum CollectError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid search URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("page task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result type alias for collection operations
pub type Result<T> = std::result::Result<T, CollectError>;

// Re-export commonly used types
pub use aggregate::{rank_labels, top_n, LabelCount};
pub use collector::{collect_labels, CollectOptions, Mode};
