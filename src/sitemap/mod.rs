//! Sitemap generation
//!
//! Turns the final visited set into XML sitemap files: entry assembly and
//! chunking in [`builder`], XML rendering and file output in [`writer`].

mod builder;
mod writer;

pub use builder::{build_entries, chunk_entries, SitemapEntry, MAX_URLS_PER_FILE};
pub use writer::{render_index, render_urlset, xml_escape, GeneratedFile, SitemapWriter};

use crate::config::Config;
use crate::events::{CrawlEvent, RunLog};
use crate::filters::FilterRules;
use crate::state::VisitedStore;
use crate::url::strip_www;
use crate::{Result, SitemillError};
use chrono::NaiveDate;
use std::path::Path;
use url::Url;

/// Generates all sitemap files for a finished crawl
///
/// In combined mode every eligible URL lands in one sitemap (chunked above
/// 50,000 entries). With `split-by-site` each configured domain gets its
/// own sitemap holding the eligible URLs whose host matches, compared
/// www-insensitively so resumed state keeps sorting correctly. Whenever
/// more than one sitemap file is produced a `sitemap-index.xml` referencing
/// them all is written too, and returned last.
///
/// A failure writing one domain's sitemap in split mode aborts that domain
/// and continues with the rest; a failure creating the output directory is
/// fatal.
pub fn generate(
    store: &VisitedStore,
    config: &Config,
    filters: &FilterRules,
    log: &mut RunLog,
    today: NaiveDate,
) -> Result<Vec<GeneratedFile>> {
    let directory = Path::new(&config.output.directory);
    std::fs::create_dir_all(directory).map_err(|e| SitemillError::Output {
        path: directory.display().to_string(),
        source: e,
    })?;

    let url_base = match &config.output.url_base {
        Some(base) => Url::parse(base)?,
        None => Url::parse(&config.crawler.domains[0])?,
    };
    let writer = SitemapWriter::new(
        directory,
        url_base,
        config.output.gzip,
        config.output.pretty,
    );

    let mut files = Vec::new();

    if config.output.split_by_site {
        for domain in &config.crawler.domains {
            let Ok(domain_url) = Url::parse(domain) else {
                continue;
            };
            let Some(host) = domain_url.host_str() else {
                continue;
            };
            let site = strip_www(host).to_ascii_lowercase();

            let locs: Vec<String> = store
                .eligible_urls()
                .into_iter()
                .filter(|loc| {
                    Url::parse(loc)
                        .ok()
                        .and_then(|u| u.host_str().map(|h| strip_www(h).to_ascii_lowercase()))
                        .map(|h| h == site)
                        .unwrap_or(false)
                })
                .map(str::to_string)
                .collect();

            let entries = build_entries(
                locs,
                filters,
                config.filters.use_priority,
                config.filters.use_changefreq,
                today,
            );
            let stem = format!("sitemap-{}", site);

            match writer.write_sitemaps(&stem, &chunk_entries(entries), today) {
                Ok(written) => files.extend(written),
                Err(e) => {
                    tracing::error!("Abandoning sitemap for {}: {}", domain, e);
                    log.record(CrawlEvent::DomainAborted {
                        domain: domain.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
    } else {
        let locs: Vec<String> = store
            .eligible_urls()
            .into_iter()
            .map(str::to_string)
            .collect();
        let entries = build_entries(
            locs,
            filters,
            config.filters.use_priority,
            config.filters.use_changefreq,
            today,
        );
        files = writer.write_sitemaps("sitemap", &chunk_entries(entries), today)?;
    }

    if files.len() > 1 {
        let index = writer.write_index(&files, today)?;
        files.push(index);
    }

    Ok(files)
}
