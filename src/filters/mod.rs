//! Rule/filter engine
//!
//! Applies the site-specific inclusion/exclusion rules and computes the
//! sitemap priority/changefreq hints for a URL. Rules are loaded once from
//! a JSON file at construction and immutable afterward; a missing or
//! malformed file degrades to permissive defaults.

use crate::events::{CrawlEvent, RunLog};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// On-disk JSON shape of the filter configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterFile {
    pub exclude_extensions: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub include_only_patterns: Vec<String>,
    pub priority_patterns: PriorityPatterns,
    pub changefreq_patterns: ChangefreqPatterns,
}

/// Substring lists mapped to high/low sitemap priority
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PriorityPatterns {
    pub high: Vec<String>,
    pub low: Vec<String>,
}

/// Substring lists mapped to daily/monthly change frequency
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChangefreqPatterns {
    pub daily: Vec<String>,
    pub monthly: Vec<String>,
}

/// Compiled filter rules
///
/// Wildcard patterns compile `*` to `.*` with every other character
/// regex-escaped; matching is case-insensitive and anchored to the whole
/// URL string.
#[derive(Debug, Default)]
pub struct FilterRules {
    exclude_extensions: HashSet<String>,
    exclude_patterns: Vec<Regex>,
    include_only_patterns: Vec<Regex>,
    priority_high: Vec<String>,
    priority_low: Vec<String>,
    changefreq_daily: Vec<String>,
    changefreq_monthly: Vec<String>,
}

impl FilterRules {
    /// Rules that exclude nothing and classify everything as default
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Compiles rules from a parsed filter file
    ///
    /// Wildcard patterns that fail to compile are dropped with a warning.
    pub fn compile(file: FilterFile, log: &mut RunLog) -> Self {
        let compile_list = |patterns: &[String], log: &mut RunLog| -> Vec<Regex> {
            patterns
                .iter()
                .filter_map(|p| match compile_wildcard(p) {
                    Some(re) => Some(re),
                    None => {
                        tracing::warn!("Dropping uncompilable filter pattern: {}", p);
                        log.record(CrawlEvent::Warning {
                            message: format!("uncompilable filter pattern: {}", p),
                        });
                        None
                    }
                })
                .collect()
        };

        let exclude_patterns = compile_list(&file.exclude_patterns, log);
        let include_only_patterns = compile_list(&file.include_only_patterns, log);

        Self {
            exclude_extensions: file
                .exclude_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            exclude_patterns,
            include_only_patterns,
            priority_high: file.priority_patterns.high,
            priority_low: file.priority_patterns.low,
            changefreq_daily: file.changefreq_patterns.daily,
            changefreq_monthly: file.changefreq_patterns.monthly,
        }
    }

    /// Loads and compiles rules from a JSON file
    ///
    /// A missing file disables filtering (permissive rules) and logs a
    /// warning; malformed JSON degrades to permissive rules silently.
    pub fn load(path: &Path, log: &mut RunLog) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Filter file {} unavailable: {}", path.display(), e);
                log.record(CrawlEvent::Warning {
                    message: format!("filter file {} unavailable: {}", path.display(), e),
                });
                return Self::permissive();
            }
        };

        match serde_json::from_str::<FilterFile>(&content) {
            Ok(file) => Self::compile(file, log),
            Err(e) => {
                tracing::debug!("Filter file {} did not parse: {}", path.display(), e);
                Self::permissive()
            }
        }
    }

    /// Checks whether a URL is excluded from crawling and the sitemap
    ///
    /// Evaluation order: excluded extensions first, then exclude patterns,
    /// then the include-only allow-list (which, when non-empty, excludes
    /// every URL no pattern matches).
    pub fn should_exclude(&self, url: &str) -> bool {
        if let Some(ext) = extension_of(url) {
            if self.exclude_extensions.contains(&ext) {
                return true;
            }
        }

        if self.exclude_patterns.iter().any(|re| re.is_match(url)) {
            return true;
        }

        if !self.include_only_patterns.is_empty()
            && !self.include_only_patterns.iter().any(|re| re.is_match(url))
        {
            return true;
        }

        false
    }

    /// The sitemap priority for a URL, high patterns checked before low
    pub fn priority_of(&self, url: &str) -> &'static str {
        if self.priority_high.iter().any(|s| url.contains(s.as_str())) {
            "0.8"
        } else if self.priority_low.iter().any(|s| url.contains(s.as_str())) {
            "0.2"
        } else {
            "0.5"
        }
    }

    /// The sitemap change frequency for a URL
    pub fn changefreq_of(&self, url: &str) -> &'static str {
        if self
            .changefreq_daily
            .iter()
            .any(|s| url.contains(s.as_str()))
        {
            "daily"
        } else if self
            .changefreq_monthly
            .iter()
            .any(|s| url.contains(s.as_str()))
        {
            "monthly"
        } else {
            "weekly"
        }
    }
}

/// Compiles a wildcard pattern into an anchored, case-insensitive regex
fn compile_wildcard(pattern: &str) -> Option<Regex> {
    let mut source = String::from("(?i)^");
    let mut first = true;
    for literal in pattern.split('*') {
        if !first {
            source.push_str(".*");
        }
        source.push_str(&regex::escape(literal));
        first = false;
    }
    source.push('$');
    Regex::new(&source).ok()
}

/// Extracts the lowercase file extension from a URL's last path segment
fn extension_of(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or("");
    let segment = path.rsplit('/').next().unwrap_or("");
    let (_, ext) = segment.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}
