//! Output module for crawl results
//!
//! This module handles:
//! - Writing the inverted index file
//! - Recording and printing crawl statistics

mod index_file;
pub mod stats;

pub use index_file::{render_index, write_index, INDEX_HEADER};
pub use stats::{print_statistics, CrawlStatistics};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
