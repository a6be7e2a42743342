use serde::Deserialize;

/// Main configuration structure for Sitemill
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Required access key gating execution
    pub access_key: String,

    pub crawler: CrawlerConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    pub output: OutputConfig,

    #[serde(default)]
    pub filters: FilterConfig,

    #[serde(default)]
    pub ping: PingConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Start URLs, one per domain; crawled sequentially in order
    pub domains: Vec<String>,

    /// Maximum depth to crawl from each domain's start URL
    pub max_depth: u32,

    /// Fetch batch size; a whole batch resolves before the next starts
    #[serde(default = "default_thread_count")]
    pub thread_count: usize,

    /// User agent sent with every request and matched against robots.txt
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Whether `<meta name="robots">` directives are honored
    #[serde(default = "default_true")]
    pub honor_meta_robots: bool,

    /// Where a robots.txt crawl-delay sleep is placed
    #[serde(default)]
    pub delay_mode: DelayMode,
}

/// Placement of the robots.txt crawl-delay sleep
///
/// `AfterEach` reproduces the historical behavior of pausing after every
/// processed item inside a batch, which serializes the delay even though
/// fetches run concurrently. `BetweenBatches` pauses once per batch
/// instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DelayMode {
    #[default]
    AfterEach,
    BetweenBatches,
}

/// Visited-cache configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CacheConfig {
    /// Path of the per-installation visited cache file
    #[serde(default = "default_cache_path")]
    pub path: String,

    /// Load the cache as the starting visited map (continue an
    /// interrupted crawl)
    #[serde(default)]
    pub resume: bool,

    /// Delete the cache before starting (full recrawl)
    #[serde(default)]
    pub reset: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
            resume: false,
            reset: false,
        }
    }
}

/// Sitemap output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory receiving the generated sitemap files
    pub directory: String,

    /// Gzip-compress the generated files (`.xml.gz`)
    #[serde(default)]
    pub gzip: bool,

    /// Indented XML instead of compact single-line output
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Render one sitemap per domain instead of one combined sitemap
    #[serde(default)]
    pub split_by_site: bool,

    /// Public base URL where the generated files will be hosted; defaults
    /// to the first configured domain
    #[serde(default)]
    pub url_base: Option<String>,
}

/// Filter engine configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FilterConfig {
    /// Path to the JSON filter rule file
    #[serde(default)]
    pub rules_path: Option<String>,

    /// Apply extension/pattern exclusion while crawling
    #[serde(default = "default_true")]
    pub use_filters: bool,

    /// Apply priority patterns when building the sitemap
    #[serde(default = "default_true")]
    pub use_priority: bool,

    /// Apply changefreq patterns when building the sitemap
    #[serde(default = "default_true")]
    pub use_changefreq: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            rules_path: None,
            use_filters: true,
            use_priority: true,
            use_changefreq: true,
        }
    }
}

/// Search-engine ping configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PingConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Endpoints the sitemap URL is appended to, e.g.
    /// `https://www.google.com/ping?sitemap=`
    #[serde(default)]
    pub endpoints: Vec<String>,
}

fn default_thread_count() -> usize {
    10
}

fn default_user_agent() -> String {
    "SitemillBot/1.0".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_cache_path() -> String {
    "./sitemill-cache.json".to_string()
}

fn default_true() -> bool {
    true
}
