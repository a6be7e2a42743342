//! Append-only run log
//!
//! Non-fatal trouble during a crawl (failed fetches, policy blocks,
//! degraded configuration) is recorded here as explicit events instead of
//! hidden shared state, and rolled up into a health summary at the end of
//! the run.

use std::fmt;

/// A single recorded event from a crawl run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    /// Non-fatal degradation (missing filter file, unreadable cache, ...)
    Warning { message: String },

    /// A fetch that failed or returned an empty body; the URL stays
    /// unvisited and is eligible for retry on a resumed run
    FetchFailed { url: String, reason: String },

    /// URL disallowed by robots.txt; marked visited, never fetched
    RobotsBlocked { url: String },

    /// Page carried a meta robots noindex/nofollow directive
    MetaBlocked { url: String },

    /// A whole domain was abandoned (e.g. output directory failure)
    DomainAborted { domain: String, reason: String },
}

/// Counters and events accumulated over one run
#[derive(Debug, Default)]
pub struct RunLog {
    events: Vec<CrawlEvent>,
    pages_fetched: u64,
    pages_accepted: u64,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event to the log
    pub fn record(&mut self, event: CrawlEvent) {
        self.events.push(event);
    }

    /// Counts a completed fetch attempt that returned a body
    pub fn count_fetch(&mut self) {
        self.pages_fetched += 1;
    }

    /// Counts a page accepted into the visited set as sitemap-eligible
    pub fn count_accepted(&mut self) {
        self.pages_accepted += 1;
    }

    pub fn events(&self) -> &[CrawlEvent] {
        &self.events
    }

    pub fn pages_fetched(&self) -> u64 {
        self.pages_fetched
    }

    pub fn pages_accepted(&self) -> u64 {
        self.pages_accepted
    }

    /// Rolls the log up into per-category counts
    pub fn summary(&self) -> HealthSummary {
        let mut summary = HealthSummary {
            pages_fetched: self.pages_fetched,
            pages_accepted: self.pages_accepted,
            ..HealthSummary::default()
        };

        for event in &self.events {
            match event {
                CrawlEvent::Warning { .. } => summary.warnings += 1,
                CrawlEvent::FetchFailed { .. } => summary.fetch_failures += 1,
                CrawlEvent::RobotsBlocked { .. } => summary.robots_blocked += 1,
                CrawlEvent::MetaBlocked { .. } => summary.meta_blocked += 1,
                CrawlEvent::DomainAborted { .. } => summary.domains_aborted += 1,
            }
        }

        summary
    }
}

/// Aggregated health of a finished run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HealthSummary {
    pub pages_fetched: u64,
    pub pages_accepted: u64,
    pub fetch_failures: u64,
    pub robots_blocked: u64,
    pub meta_blocked: u64,
    pub domains_aborted: u64,
    pub warnings: u64,
}

impl fmt::Display for HealthSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pages fetched:   {}", self.pages_fetched)?;
        writeln!(f, "Pages accepted:  {}", self.pages_accepted)?;
        writeln!(f, "Fetch failures:  {}", self.fetch_failures)?;
        writeln!(f, "Robots blocked:  {}", self.robots_blocked)?;
        writeln!(f, "Meta blocked:    {}", self.meta_blocked)?;
        writeln!(f, "Domains aborted: {}", self.domains_aborted)?;
        write!(f, "Warnings:        {}", self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_by_category() {
        let mut log = RunLog::new();
        log.record(CrawlEvent::Warning {
            message: "no filter file".to_string(),
        });
        log.record(CrawlEvent::RobotsBlocked {
            url: "https://x.test/private".to_string(),
        });
        log.record(CrawlEvent::RobotsBlocked {
            url: "https://x.test/private/2".to_string(),
        });
        log.record(CrawlEvent::FetchFailed {
            url: "https://x.test/missing".to_string(),
            reason: "timeout".to_string(),
        });
        log.count_fetch();
        log.count_accepted();

        let summary = log.summary();
        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.robots_blocked, 2);
        assert_eq!(summary.fetch_failures, 1);
        assert_eq!(summary.meta_blocked, 0);
        assert_eq!(summary.pages_fetched, 1);
        assert_eq!(summary.pages_accepted, 1);
    }

    #[test]
    fn test_events_preserve_order() {
        let mut log = RunLog::new();
        log.record(CrawlEvent::Warning {
            message: "first".to_string(),
        });
        log.record(CrawlEvent::Warning {
            message: "second".to_string(),
        });

        let messages: Vec<_> = log
            .events()
            .iter()
            .map(|e| match e {
                CrawlEvent::Warning { message } => message.clone(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}
