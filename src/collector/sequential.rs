//! Sequential page collection
//!
//! Drives the fetcher and extractor across all pages one at a time: each
//! page's fetch, including any retry backoff, completes before the next
//! page begins. Total wall-clock cost is the sum of page latencies plus
//! all backoff waits.

use crate::collector::{extract_labels, fetch_page, CollectOptions, PageRequest};
use crate::Result;
use reqwest::Client;

/// Collects topic tags for pages `1..=pages_count`, in page order
///
/// A terminal fetch failure on any page aborts the run immediately; pages
/// after the failing one are never requested and no partial label list is
/// returned.
pub async fn collect_sequential(client: &Client, opts: &CollectOptions) -> Result<Vec<String>> {
    let policy = opts.retry_policy();
    let mut labels = Vec::new();

    for page in 1..=opts.pages_count {
        let request = PageRequest {
            base_url: opts.base_url.clone(),
            query: opts.query.clone(),
            page,
        };

        let body = fetch_page(client, &request, &policy).await?;
        let page_labels = extract_labels(&body);

        tracing::debug!(
            "Page {} processed, {} labels ({} total)",
            page,
            page_labels.len(),
            labels.len() + page_labels.len()
        );

        labels.extend(page_labels);
    }

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::build_http_client;
    use crate::{CollectError, FetchError};
    use std::time::Duration;
    use url::Url;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn topic(label: &str) -> String {
        format!(r#"<a class="topic-tag topic-tag-link f6 px-2 mx-0">{label}</a>"#)
    }

    fn options(server: &MockServer, pages_count: u32) -> CollectOptions {
        CollectOptions {
            base_url: Url::parse(&server.uri()).unwrap(),
            query: "rust".to_string(),
            pages_count,
            timeout_unit: Duration::from_millis(1),
            max_retries: 1,
        }
    }

    #[tokio::test]
    async fn test_labels_accumulate_in_page_order() {
        let server = MockServer::start().await;

        for (page, label) in [("1", "alpha"), ("2", "beta"), ("3", "gamma")] {
            Mock::given(method("GET"))
                .and(query_param("p", page))
                .respond_with(ResponseTemplate::new(200).set_body_string(topic(label)))
                .mount(&server)
                .await;
        }

        let client = build_http_client().unwrap();
        let labels = collect_sequential(&client, &options(&server, 3))
            .await
            .unwrap();

        assert_eq!(labels, vec!["alpha", "beta", "gamma"]);
    }

    #[tokio::test]
    async fn test_page_without_labels_contributes_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("p", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(topic("alpha")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("p", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>no tags</body></html>"))
            .mount(&server)
            .await;

        let client = build_http_client().unwrap();
        let labels = collect_sequential(&client, &options(&server, 2))
            .await
            .unwrap();

        assert_eq!(labels, vec!["alpha"]);
    }

    #[tokio::test]
    async fn test_failure_aborts_run_and_skips_later_pages() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("p", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(topic("alpha")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("p", "2"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("p", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_string(topic("gamma")))
            .expect(0) // run aborts before page 3
            .mount(&server)
            .await;

        let client = build_http_client().unwrap();
        let err = collect_sequential(&client, &options(&server, 3))
            .await
            .unwrap_err();

        match err {
            CollectError::Fetch(FetchError::Status { page, status }) => {
                assert_eq!(page, 2);
                assert_eq!(status, 404);
            }
            other => panic!("expected Status error for page 2, got {:?}", other),
        }
    }
}
