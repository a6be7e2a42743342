//! Sitemill: a crawling XML sitemap generator
//!
//! This crate crawls one or more web domains and emits standards-compliant
//! XML sitemaps, honoring robots.txt, per-page meta robots directives, and
//! site-specific inclusion/exclusion and priority rules.

pub mod config;
pub mod crawler;
pub mod events;
pub mod filters;
pub mod notify;
pub mod robots;
pub mod sitemap;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sitemill operations
#[derive(Debug, Error)]
pub enum SitemillError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Access key rejected")]
    AccessDenied,

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Visited cache error at {path}: {source}")]
    Cache {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to serialize visited cache: {0}")]
    CacheSerialize(#[from] serde_json::Error),

    #[error("Output error for {path}: {source}")]
    Output {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid domain URL in config: {0}")]
    InvalidDomain(String),
}

/// Result type alias for Sitemill operations
pub type Result<T> = std::result::Result<T, SitemillError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use events::{CrawlEvent, RunLog};
pub use filters::FilterRules;
pub use robots::RobotsPolicy;
pub use state::VisitedStore;
pub use url::{canonicalize, resolve, same_site};
