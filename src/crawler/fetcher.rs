//! HTTP fetcher implementation
//!
//! Builds the shared HTTP client and performs the page fetches. Every
//! failure is non-fatal: it is classified into a reason string, the URL is
//! left unvisited, and the crawl continues.

use crate::config::CrawlerConfig;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Result of fetching a single page
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successfully fetched a non-empty body
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// Page body content
        body: String,
    },

    /// Fetch failed: HTTP error status, network error, timeout, or an
    /// empty body. The URL stays unvisited and can be retried on a
    /// resumed run.
    Failed { reason: String },
}

/// Builds the HTTP client used for the whole run
///
/// The client carries the configured user agent, the per-request timeout,
/// and follows redirects (up to 10 hops).
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the result
///
/// An empty body counts as a failure: there is nothing to parse and the
/// URL should stay eligible for a future retry.
pub async fn fetch_page(client: &Client, url: &str) -> FetchOutcome {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().clone();

            if !status.is_success() {
                return FetchOutcome::Failed {
                    reason: format!("HTTP {}", status.as_u16()),
                };
            }

            match response.text().await {
                Ok(body) if body.trim().is_empty() => FetchOutcome::Failed {
                    reason: "empty response body".to_string(),
                },
                Ok(body) => FetchOutcome::Success { final_url, body },
                Err(e) => FetchOutcome::Failed {
                    reason: format!("body read failed: {}", e),
                },
            }
        }
        Err(e) => {
            let reason = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                "connection failed".to_string()
            } else if e.is_redirect() {
                "redirect loop or limit exceeded".to_string()
            } else {
                e.to_string()
            };
            FetchOutcome::Failed { reason }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DelayMode;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> CrawlerConfig {
        CrawlerConfig {
            domains: vec!["https://example.com/".to_string()],
            max_depth: 2,
            thread_count: 5,
            user_agent: "TestBot/1.0".to_string(),
            timeout_secs: 5,
            honor_meta_robots: true,
            delay_mode: DelayMode::AfterEach,
        }
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&test_config()).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>hi</html>"))
            .mount(&server)
            .await;

        let client = build_http_client(&test_config()).unwrap();
        let outcome = fetch_page(&client, &format!("{}/page", server.uri())).await;
        match outcome {
            FetchOutcome::Success { body, .. } => assert_eq!(body, "<html>hi</html>"),
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_http_error_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_http_client(&test_config()).unwrap();
        let outcome = fetch_page(&client, &format!("{}/missing", server.uri())).await;
        match outcome {
            FetchOutcome::Failed { reason } => assert_eq!(reason, "HTTP 404"),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_empty_body_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/empty"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let client = build_http_client(&test_config()).unwrap();
        let outcome = fetch_page(&client, &format!("{}/empty", server.uri())).await;
        assert!(matches!(outcome, FetchOutcome::Failed { .. }));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_failure() {
        let client = build_http_client(&test_config()).unwrap();
        // Port 9 (discard) is almost certainly closed
        let outcome = fetch_page(&client, "http://127.0.0.1:9/").await;
        assert!(matches!(outcome, FetchOutcome::Failed { .. }));
    }

    #[tokio::test]
    async fn test_fetch_follows_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("location", format!("{}/new", server.uri()).as_str()),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>moved</html>"))
            .mount(&server)
            .await;

        let client = build_http_client(&test_config()).unwrap();
        let outcome = fetch_page(&client, &format!("{}/old", server.uri())).await;
        match outcome {
            FetchOutcome::Success { final_url, .. } => {
                assert!(final_url.as_str().ends_with("/new"));
            }
            other => panic!("expected success, got {:?}", other),
        }
    }
}
