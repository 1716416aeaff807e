//! Statistics gathered during a crawl
//!
//! This module provides the counters the coordinator updates while it runs
//! and the console report printed at the end of a crawl.

use crate::state::PageState;
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// Total number of pages claimed from the frontier and completed
    pub pages_visited: u64,

    /// Count of pages by terminal state
    pub pages_by_state: HashMap<PageState, u64>,

    /// Processed pages that had no course blocks
    pub pages_without_courses: u64,

    /// Course text blobs fed into the index
    pub course_blobs: u64,

    /// Course text blobs skipped because their code was not in the course map
    pub unmapped_blobs: u64,

    /// Distinct course codes missing from the course map
    pub unmapped_codes: u64,

    /// Links added to the frontier
    pub links_queued: u64,

    /// Distinct words in the final index
    pub words: u64,

    /// `(word, course)` associations in the final index
    pub associations: u64,
}

impl CrawlStatistics {
    /// Records a page reaching its terminal state
    pub fn record_page(&mut self, state: PageState) {
        self.pages_visited += 1;
        *self.pages_by_state.entry(state).or_insert(0) += 1;
    }

    /// Number of pages that ended in `state`
    pub fn count(&self, state: PageState) -> u64 {
        self.pages_by_state.get(&state).copied().unwrap_or(0)
    }

    /// Number of pages that ended in an error state
    pub fn errors(&self) -> u64 {
        self.pages_by_state
            .iter()
            .filter(|(state, _)| state.is_error())
            .map(|(_, count)| count)
            .sum()
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Pages visited: {}", stats.pages_visited);
    println!("  Links queued: {}", stats.links_queued);
    println!("  Course text blobs indexed: {}", stats.course_blobs);
    println!("  Words indexed: {}", stats.words);
    println!("  Word/course associations: {}", stats.associations);
    println!();

    println!("Pages by State:");
    // Sort states by count (descending), then by name for a stable listing
    let mut state_counts: Vec<_> = stats.pages_by_state.iter().collect();
    state_counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));

    for (state, count) in state_counts {
        let percentage = if stats.pages_visited > 0 {
            (*count as f64 / stats.pages_visited as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", state, count, percentage);
    }
    println!();

    if stats.pages_without_courses > 0 {
        println!("Pages without course blocks: {}", stats.pages_without_courses);
    }

    if stats.unmapped_codes > 0 {
        println!(
            "Unmapped course codes: {} ({} text blobs skipped)",
            stats.unmapped_codes, stats.unmapped_blobs
        );
    }

    let processed = stats.count(PageState::Processed);
    let success_rate = if stats.pages_visited > 0 {
        (processed as f64 / stats.pages_visited as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Success Rate: {:.1}% ({} / {} pages successfully processed)",
        success_rate, processed, stats.pages_visited
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_page() {
        let mut stats = CrawlStatistics::default();
        stats.record_page(PageState::Processed);
        stats.record_page(PageState::Processed);
        stats.record_page(PageState::DeadLink);

        assert_eq!(stats.pages_visited, 3);
        assert_eq!(stats.count(PageState::Processed), 2);
        assert_eq!(stats.count(PageState::DeadLink), 1);
        assert_eq!(stats.count(PageState::Unreachable), 0);
    }

    #[test]
    fn test_errors_excludes_processed() {
        let mut stats = CrawlStatistics::default();
        stats.record_page(PageState::Processed);
        stats.record_page(PageState::Failed);
        stats.record_page(PageState::ContentMismatch);

        assert_eq!(stats.errors(), 2);
    }
}
