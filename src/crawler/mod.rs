//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The FIFO frontier with its visited set
//! - HTTP fetching and failure classification
//! - HTML parsing, course extraction and link extraction
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{run_crawl, Coordinator, CrawlReport};
pub use fetcher::{build_http_client, fetch_url, user_agent_string, FetchResult};
pub use frontier::Frontier;
pub use parser::{extract_links, parse_page, ParsedPage};
