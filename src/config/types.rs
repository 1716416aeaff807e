use serde::Deserialize;

/// Catalog index page the crawl starts from when none is configured
pub const DEFAULT_START_URL: &str = "http://www.classes.cs.uchicago.edu/archive/2015/winter\
/12200-1/new.collegecatalog.uchicago.edu/index.html";

/// Domain every followed URL must belong to
pub const DEFAULT_LIMITING_DOMAIN: &str = "classes.cs.uchicago.edu";

/// Default page budget
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Four word characters, a space, then a five or six digit number (e.g. "CMSC 12100")
pub const DEFAULT_CODE_PATTERN: &str = r"\w{4} [0-9]{5,6}";

/// Main configuration structure for Catalog Crawler
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// URL the frontier is seeded with
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Only URLs on this domain (or its subdomains) are followed
    #[serde(rename = "limiting-domain")]
    pub limiting_domain: String,

    /// Maximum number of distinct pages to visit
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Maximum number of fetches in flight at once
    #[serde(rename = "max-concurrent-pages-open")]
    pub max_concurrent_pages_open: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Regular expression matching a course code inside a course title
    #[serde(rename = "code-pattern")]
    pub code_pattern: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            limiting_domain: DEFAULT_LIMITING_DOMAIN.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            max_concurrent_pages_open: 1,
            request_timeout_secs: 10,
            code_pattern: DEFAULT_CODE_PATTERN.to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "catalog-crawler".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JSON file mapping course codes to numeric course identifiers
    #[serde(rename = "course-map-path")]
    pub course_map_path: String,

    /// Destination of the pipe-delimited index
    #[serde(rename = "index-path")]
    pub index_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            course_map_path: "course_map.json".to_string(),
            index_path: "catalog_index.csv".to_string(),
        }
    }
}
