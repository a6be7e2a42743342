//! Frontier and fetch dispatcher
//!
//! Runs one domain's crawl as a Seed -> Batch-Fetch -> Expand -> Drain
//! loop. Each batch of up to `thread_count` fetches runs concurrently and
//! the dispatcher waits for the whole batch (a synchronous barrier) before
//! examining any result or scheduling the next batch; frontier expansion
//! therefore never races the visited map.

use crate::config::{CrawlerConfig, DelayMode};
use crate::crawler::fetcher::{fetch_page, FetchOutcome};
use crate::crawler::frontier::{Frontier, FrontierEntry};
use crate::crawler::parser::parse_page;
use crate::events::{CrawlEvent, RunLog};
use crate::filters::FilterRules;
use crate::robots::{self, RobotsPolicy};
use crate::state::VisitedStore;
use crate::url::{canonicalize, resolve, same_site};
use crate::Result;
use futures::future::join_all;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Drives the crawl of a single domain
pub struct Dispatcher<'a> {
    client: &'a Client,
    config: &'a CrawlerConfig,
    filters: &'a FilterRules,
    apply_filters: bool,
    store: &'a mut VisitedStore,
    log: &'a mut RunLog,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        client: &'a Client,
        config: &'a CrawlerConfig,
        filters: &'a FilterRules,
        apply_filters: bool,
        store: &'a mut VisitedStore,
        log: &'a mut RunLog,
    ) -> Self {
        Self {
            client,
            config,
            filters,
            apply_filters,
            store,
            log,
        }
    }

    /// Crawls one domain to exhaustion of its frontier
    ///
    /// The robots policy is loaded once at the start and immutable for the
    /// rest of the crawl. Robots-blocked and meta-blocked URLs are marked
    /// visited (ineligible) so they are never re-evaluated; failed fetches
    /// stay unvisited and can be retried on a resumed run.
    pub async fn crawl_domain(&mut self, start_url: &Url) -> Result<()> {
        let policy =
            robots::load(self.client, start_url, &self.config.user_agent, self.log).await;
        let delay = policy.crawl_delay().map(Duration::from_secs);

        let mut frontier = Frontier::seed(start_url.clone());
        let mut batches = 0u64;

        while !frontier.is_empty() {
            let batch = frontier.take_batch(self.config.thread_count);
            let to_fetch = self.screen_batch(batch, &policy)?;
            if to_fetch.is_empty() {
                continue;
            }

            // Whole batch resolves before any result is examined
            let outcomes = join_all(
                to_fetch
                    .iter()
                    .map(|(entry, _)| fetch_page(self.client, entry.url.as_str())),
            )
            .await;

            let mut fetched_any = false;
            for ((entry, canonical), outcome) in to_fetch.into_iter().zip(outcomes) {
                fetched_any = true;
                self.expand(entry, canonical, outcome, start_url, &mut frontier)?;

                if let (Some(pause), DelayMode::AfterEach) = (delay, self.config.delay_mode) {
                    tokio::time::sleep(pause).await;
                }
            }

            if fetched_any {
                if let (Some(pause), DelayMode::BetweenBatches) = (delay, self.config.delay_mode)
                {
                    tokio::time::sleep(pause).await;
                }
            }

            batches += 1;
            if batches % 10 == 0 {
                tracing::info!(
                    "{}: {} batches done, {} in frontier, {} visited",
                    start_url.host_str().unwrap_or("?"),
                    batches,
                    frontier.len(),
                    self.store.len()
                );
            }
        }

        Ok(())
    }

    /// Screens a dequeued batch down to the entries worth fetching
    ///
    /// Skips visited, over-depth, and rule-excluded entries outright.
    /// Robots-blocked entries are recorded as visited (ineligible) and
    /// persisted before being skipped.
    fn screen_batch(
        &mut self,
        batch: Vec<FrontierEntry>,
        policy: &RobotsPolicy,
    ) -> Result<Vec<(FrontierEntry, String)>> {
        let mut selected = Vec::new();
        let mut batch_keys = HashSet::new();

        for entry in batch {
            let canonical = canonicalize(entry.url.as_str());
            if canonical.is_empty() {
                continue;
            }
            if self.store.contains(&canonical) || !batch_keys.insert(canonical.clone()) {
                continue;
            }
            if entry.depth > self.config.max_depth {
                continue;
            }
            if self.apply_filters && self.filters.should_exclude(entry.url.as_str()) {
                continue;
            }
            if policy.is_blocked(entry.url.as_str()) {
                tracing::debug!("robots.txt blocks {}", entry.url);
                self.store.mark(&canonical, false);
                self.store.persist()?;
                self.log.record(CrawlEvent::RobotsBlocked {
                    url: entry.url.to_string(),
                });
                continue;
            }

            selected.push((entry, canonical));
        }

        Ok(selected)
    }

    /// Processes one fetch outcome and grows the frontier from its links
    fn expand(
        &mut self,
        entry: FrontierEntry,
        canonical: String,
        outcome: FetchOutcome,
        start_url: &Url,
        frontier: &mut Frontier,
    ) -> Result<()> {
        let (final_url, body) = match outcome {
            FetchOutcome::Failed { reason } => {
                tracing::debug!("fetch failed for {}: {}", entry.url, reason);
                self.log.record(CrawlEvent::FetchFailed {
                    url: entry.url.to_string(),
                    reason,
                });
                return Ok(());
            }
            FetchOutcome::Success { final_url, body } => (final_url, body),
        };

        self.log.count_fetch();
        let page = parse_page(&body);

        if self.config.honor_meta_robots && page.meta_blocked {
            tracing::debug!("meta robots blocks {}", entry.url);
            self.store.mark(&canonical, false);
            self.store.persist()?;
            self.log.record(CrawlEvent::MetaBlocked {
                url: entry.url.to_string(),
            });
            return Ok(());
        }

        self.store.mark(&canonical, true);
        self.store.persist()?;
        self.log.count_accepted();

        // <base href> wins over the fetched page's own URL
        let base = page
            .base_href
            .as_deref()
            .and_then(|href| resolve(href, &final_url))
            .unwrap_or_else(|| final_url.clone());

        for href in &page.hrefs {
            let Some(absolute) = resolve(href, &base) else {
                continue;
            };
            if !same_site(&absolute, start_url) {
                continue;
            }
            let link_canonical = canonicalize(absolute.as_str());
            if link_canonical.is_empty() || self.store.contains(&link_canonical) {
                continue;
            }
            if self.apply_filters && self.filters.should_exclude(absolute.as_str()) {
                continue;
            }
            frontier.push(absolute, entry.depth + 1);
        }

        Ok(())
    }
}
