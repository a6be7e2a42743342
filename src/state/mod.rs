//! Visited state store
//!
//! A per-installation JSON cache mapping canonical URL to a boolean. A URL
//! present in the map is never fetched again in the same run; the value
//! records whether the page is sitemap-eligible (`true`) or was visited but
//! blocked by policy (`false`). The map is rewritten after every accepted
//! page so a crash loses at most the in-flight batch.

use crate::events::{CrawlEvent, RunLog};
use crate::{Result, SitemillError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The resumable dedup map backing a crawl
#[derive(Debug)]
pub struct VisitedStore {
    path: PathBuf,
    map: HashMap<String, bool>,
}

impl VisitedStore {
    /// Creates an empty store backed by `path`, ignoring any existing file
    pub fn fresh(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            map: HashMap::new(),
        }
    }

    /// Loads the store from its cache file for a resumed crawl
    ///
    /// A missing file starts an empty store. An unreadable or corrupt file
    /// (e.g. a partial write from a killed process) also starts empty, with
    /// a warning in the run log.
    pub fn resume(path: &Path, log: &mut RunLog) -> Self {
        let map = match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<HashMap<String, bool>>(&content) {
                Ok(map) => {
                    tracing::info!("Resuming with {} cached URLs from {}", map.len(), path.display());
                    map
                }
                Err(e) => {
                    tracing::warn!("Visited cache {} is corrupt: {}", path.display(), e);
                    log.record(CrawlEvent::Warning {
                        message: format!("visited cache {} is corrupt, starting empty: {}", path.display(), e),
                    });
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                tracing::warn!("Visited cache {} unreadable: {}", path.display(), e);
                log.record(CrawlEvent::Warning {
                    message: format!("visited cache {} unreadable, starting empty: {}", path.display(), e),
                });
                HashMap::new()
            }
        };

        Self {
            path: path.to_path_buf(),
            map,
        }
    }

    /// Deletes the cache file for a full recrawl, logging the discarded count
    pub fn reset(path: &Path) -> Result<Self> {
        let discarded = std::fs::read_to_string(path)
            .ok()
            .and_then(|c| serde_json::from_str::<HashMap<String, bool>>(&c).ok())
            .map(|m| m.len())
            .unwrap_or(0);

        match std::fs::remove_file(path) {
            Ok(()) => {
                tracing::info!(
                    "Reset visited cache {} ({} entries discarded)",
                    path.display(),
                    discarded
                );
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(SitemillError::Cache {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        }

        Ok(Self::fresh(path))
    }

    /// Whether a canonical URL has been visited (in any state)
    pub fn contains(&self, canonical: &str) -> bool {
        self.map.contains_key(canonical)
    }

    /// Whether a canonical URL was visited and is sitemap-eligible
    pub fn is_eligible(&self, canonical: &str) -> bool {
        self.map.get(canonical).copied().unwrap_or(false)
    }

    /// Records a visit; `eligible` is false for policy-blocked pages
    pub fn mark(&mut self, canonical: &str, eligible: bool) {
        self.map.insert(canonical.to_string(), eligible);
    }

    /// Writes the whole serialized map to the cache file
    ///
    /// Called after every accepted page; no atomic-rename guarantee, a
    /// reader must tolerate a partially written file.
    pub fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| SitemillError::Cache {
                    path: self.path.display().to_string(),
                    source: e,
                })?;
            }
        }

        let serialized = serde_json::to_string(&self.map)?;
        std::fs::write(&self.path, serialized).map_err(|e| SitemillError::Cache {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    /// All sitemap-eligible canonical URLs
    pub fn eligible_urls(&self) -> Vec<&str> {
        self.map
            .iter()
            .filter(|(_, eligible)| **eligible)
            .map(|(url, _)| url.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
