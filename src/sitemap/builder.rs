//! Sitemap entry assembly and chunking
//!
//! Entries are derived, not stored: they are recomputed from the final
//! visited set at assembly time and chunked into files of at most 50,000
//! URLs per the sitemap protocol.

use crate::filters::FilterRules;
use chrono::NaiveDate;

/// Maximum URLs per sitemap file, per the sitemap protocol
pub const MAX_URLS_PER_FILE: usize = 50_000;

/// One `<url>` element of a sitemap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: NaiveDate,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

/// Builds sorted sitemap entries from eligible canonical URLs
///
/// `lastmod` is the run date for every entry. Priority and changefreq come
/// from the rule engine unless the corresponding toggle is off, in which
/// case the protocol defaults (`0.5`, `weekly`) apply. Sorting makes the
/// output deterministic across runs.
pub fn build_entries(
    mut locs: Vec<String>,
    filters: &FilterRules,
    use_priority: bool,
    use_changefreq: bool,
    lastmod: NaiveDate,
) -> Vec<SitemapEntry> {
    locs.sort_unstable();
    locs.into_iter()
        .map(|loc| {
            let priority = if use_priority {
                filters.priority_of(&loc)
            } else {
                "0.5"
            };
            let changefreq = if use_changefreq {
                filters.changefreq_of(&loc)
            } else {
                "weekly"
            };
            SitemapEntry {
                loc,
                lastmod,
                changefreq,
                priority,
            }
        })
        .collect()
}

/// Splits entries into chunks of at most [`MAX_URLS_PER_FILE`]
///
/// An empty entry list still yields one (empty) chunk so a valid, empty
/// sitemap file is always produced.
pub fn chunk_entries(entries: Vec<SitemapEntry>) -> Vec<Vec<SitemapEntry>> {
    if entries.len() <= MAX_URLS_PER_FILE {
        return vec![entries];
    }

    let mut chunks = Vec::new();
    let mut remaining = entries;
    while remaining.len() > MAX_URLS_PER_FILE {
        let tail = remaining.split_off(MAX_URLS_PER_FILE);
        chunks.push(remaining);
        remaining = tail;
    }
    chunks.push(remaining);
    chunks
}
