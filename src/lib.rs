//! Catalog Crawler: a course-catalog crawler and keyword indexer
//!
//! This crate crawls a bounded set of pages within a single web domain,
//! extracts course records (code, title, description) from the catalog markup,
//! and builds a word-to-course inverted index suitable for keyword search.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod index;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Catalog Crawler operations
///
/// Only input and output problems surface as errors. Failures of an
/// individual page are recorded as a [`PageState`] and never abort a crawl.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Course map error: {0}")]
    CourseMap(#[from] index::CourseMapError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid course code pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Course code '{code}' has no entry in the course map")]
    UnmappedCourse { code: String },

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlState,
        to: state::CrawlState,
    },
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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),
}

/// Result type alias for Catalog Crawler operations
pub type Result<T> = std::result::Result<T, CrawlError>;

// Re-export commonly used types
pub use catalog::{CourseExtractor, CoursePage};
pub use config::Config;
pub use index::{CodeIdMap, CourseId, InvertedIndex};
pub use state::{CrawlState, PageState};
pub use url::{extract_domain, in_domain, is_url_ok_to_follow};
