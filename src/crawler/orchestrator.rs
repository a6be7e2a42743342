//! Run orchestration
//!
//! Sequences a whole run: visited-store setup per the cache configuration,
//! filter loading, one sequential crawl per configured domain, sitemap
//! generation, and the optional search-engine ping. Domains share one
//! visited store and one run log; a failure inside one domain abandons that
//! domain and continues with the rest.

use crate::config::Config;
use crate::crawler::{build_http_client, Dispatcher};
use crate::events::{CrawlEvent, RunLog};
use crate::filters::FilterRules;
use crate::sitemap::{self, GeneratedFile};
use crate::state::VisitedStore;
use crate::{notify, Result};
use std::path::Path;
use url::Url;

/// Everything a finished run produced
#[derive(Debug)]
pub struct RunOutcome {
    /// Events and counters accumulated over the run
    pub log: RunLog,

    /// Sitemap files written, the index (if any) last; empty on a dry run
    pub files: Vec<GeneratedFile>,
}

/// Executes a full crawl-and-generate run
///
/// With `dry_run` set the crawl happens and the visited cache is written,
/// but no sitemap files are produced and no ping is sent.
pub async fn run(config: &Config, dry_run: bool) -> Result<RunOutcome> {
    let mut log = RunLog::new();

    let cache_path = Path::new(&config.cache.path);
    let mut store = if config.cache.reset {
        VisitedStore::reset(cache_path)?
    } else if config.cache.resume {
        VisitedStore::resume(cache_path, &mut log)
    } else {
        VisitedStore::fresh(cache_path)
    };

    let filters = match &config.filters.rules_path {
        Some(path) => FilterRules::load(Path::new(path), &mut log),
        None => FilterRules::permissive(),
    };

    let client = build_http_client(&config.crawler)?;

    for domain in &config.crawler.domains {
        let start = match Url::parse(domain) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Skipping unparseable domain {}: {}", domain, e);
                log.record(CrawlEvent::DomainAborted {
                    domain: domain.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        tracing::info!("Crawling {}", domain);
        let mut dispatcher = Dispatcher::new(
            &client,
            &config.crawler,
            &filters,
            config.filters.use_filters,
            &mut store,
            &mut log,
        );
        if let Err(e) = dispatcher.crawl_domain(&start).await {
            tracing::error!("Abandoning {}: {}", domain, e);
            log.record(CrawlEvent::DomainAborted {
                domain: domain.clone(),
                reason: e.to_string(),
            });
        }
    }

    store.persist()?;

    if dry_run {
        tracing::info!(
            "Dry run: {} eligible URLs collected, no sitemap written",
            store.eligible_urls().len()
        );
        return Ok(RunOutcome {
            log,
            files: Vec::new(),
        });
    }

    let today = chrono::Utc::now().date_naive();
    let files = sitemap::generate(&store, config, &filters, &mut log, today)?;

    if config.ping.enabled {
        // The index covers everything when present; it is last in the list
        if let Some(announce) = files.last() {
            notify::ping_endpoints(&client, &config.ping.endpoints, &announce.url, &mut log).await;
        }
    }

    Ok(RunOutcome { log, files })
}
