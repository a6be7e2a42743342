//! Search-engine ping
//!
//! Notifies configured endpoints that a sitemap changed by appending the
//! url-encoded sitemap URL to each endpoint and issuing a GET. Pings are
//! best-effort: every failure is a logged warning, never an error.

use crate::events::{CrawlEvent, RunLog};
use reqwest::Client;
use url::form_urlencoded;

/// Pings each endpoint with the sitemap URL
///
/// # Arguments
/// * `client` - The run's shared HTTP client
/// * `endpoints` - Ping URL prefixes, e.g. `https://example.com/ping?sitemap=`
/// * `sitemap_url` - Public URL of the sitemap (or sitemap index) to announce
pub async fn ping_endpoints(
    client: &Client,
    endpoints: &[String],
    sitemap_url: &str,
    log: &mut RunLog,
) {
    let encoded: String = form_urlencoded::byte_serialize(sitemap_url.as_bytes()).collect();

    for endpoint in endpoints {
        let target = format!("{}{}", endpoint, encoded);
        match client.get(&target).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!("Pinged {}", endpoint);
            }
            Ok(response) => {
                tracing::warn!("Ping to {} returned HTTP {}", endpoint, response.status());
                log.record(CrawlEvent::Warning {
                    message: format!(
                        "ping to {} returned HTTP {}",
                        endpoint,
                        response.status().as_u16()
                    ),
                });
            }
            Err(e) => {
                tracing::warn!("Ping to {} failed: {}", endpoint, e);
                log.record(CrawlEvent::Warning {
                    message: format!("ping to {} failed: {}", endpoint, e),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_ping_sends_encoded_sitemap_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(query_param("sitemap", "https://example.com/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut log = RunLog::new();
        ping_endpoints(
            &Client::new(),
            &[format!("{}/ping?sitemap=", server.uri())],
            "https://example.com/sitemap.xml",
            &mut log,
        )
        .await;
        assert_eq!(log.summary().warnings, 0);
    }

    #[tokio::test]
    async fn test_failed_ping_is_warning_not_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut log = RunLog::new();
        ping_endpoints(
            &Client::new(),
            &[format!("{}/ping?sitemap=", server.uri())],
            "https://example.com/sitemap.xml",
            &mut log,
        )
        .await;
        assert_eq!(log.summary().warnings, 1);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_warning() {
        let mut log = RunLog::new();
        ping_endpoints(
            &Client::new(),
            &["http://127.0.0.1:9/ping?sitemap=".to_string()],
            "https://example.com/sitemap.xml",
            &mut log,
        )
        .await;
        assert_eq!(log.summary().warnings, 1);
    }

    #[tokio::test]
    async fn test_one_failure_does_not_stop_remaining_pings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut log = RunLog::new();
        ping_endpoints(
            &Client::new(),
            &[
                "http://127.0.0.1:9/ping?sitemap=".to_string(),
                format!("{}/ok?sitemap=", server.uri()),
            ],
            "https://example.com/sitemap.xml",
            &mut log,
        )
        .await;
        assert_eq!(log.summary().warnings, 1);
    }
}
