//! Robots.txt handling module
//!
//! Fetches `{scheme}://{host}/robots.txt` once per domain and evaluates
//! crawl permissions against the parsed policy.

mod parser;

pub use parser::{Directive, RobotsPolicy, RobotsRule};

use crate::events::{CrawlEvent, RunLog};
use reqwest::Client;
use url::Url;

/// Loads the robots policy for a domain
///
/// A fetch failure is non-fatal: the policy degrades to empty (nothing
/// disallowed) and a warning is recorded in the run log.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `site` - Any URL on the domain; only scheme and host are used
/// * `user_agent` - The agent name used to select a robots.txt block
/// * `log` - The run log receiving the warning on failure
pub async fn load(client: &Client, site: &Url, user_agent: &str, log: &mut RunLog) -> RobotsPolicy {
    let robots_url = format!(
        "{}://{}/robots.txt",
        site.scheme(),
        site.host_str().unwrap_or_default()
    );

    let body = match client.get(&robots_url).send().await {
        Ok(response) if response.status().is_success() => match response.text().await {
            Ok(text) => Some(text),
            Err(e) => {
                warn_unavailable(&robots_url, &e.to_string(), log);
                None
            }
        },
        Ok(response) => {
            warn_unavailable(&robots_url, &format!("HTTP {}", response.status()), log);
            None
        }
        Err(e) => {
            warn_unavailable(&robots_url, &e.to_string(), log);
            None
        }
    };

    match body {
        Some(content) => {
            tracing::debug!("Loaded robots.txt from {}", robots_url);
            RobotsPolicy::parse(&content, user_agent)
        }
        None => RobotsPolicy::empty(),
    }
}

fn warn_unavailable(robots_url: &str, reason: &str, log: &mut RunLog) {
    tracing::warn!("robots.txt unavailable at {}: {}", robots_url, reason);
    log.record(CrawlEvent::Warning {
        message: format!("robots.txt unavailable at {}: {}", robots_url, reason),
    });
}
