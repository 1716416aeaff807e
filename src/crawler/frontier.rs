//! Crawl frontier: FIFO queue of pending URLs plus the visited set
//!
//! A URL enters the queue at most once per run (it is checked against both
//! the queued and the visited sets) and is claimed at most once.

use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, Default)]
pub struct Frontier {
    /// Pending URLs in discovery order
    queue: VecDeque<String>,

    /// Every URL ever pushed, whether still pending or already claimed
    queued: HashSet<String>,

    /// URLs claimed for processing
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier holding only `start_url`
    pub fn new(start_url: &str) -> Self {
        let mut frontier = Self::default();
        frontier.push(start_url);
        frontier
    }

    /// Enqueues `url` unless it was already queued or visited
    ///
    /// Returns true if the URL was added.
    pub fn push(&mut self, url: &str) -> bool {
        if self.visited.contains(url) || self.queued.contains(url) {
            return false;
        }
        self.queued.insert(url.to_string());
        self.queue.push_back(url.to_string());
        true
    }

    /// Dequeues the next unvisited URL and marks it visited
    ///
    /// Checking and marking happen together, so a URL is handed out once.
    /// Entries that are already visited are dropped.
    pub fn claim_next(&mut self) -> Option<String> {
        while let Some(url) = self.queue.pop_front() {
            if self.visited.insert(url.clone()) {
                return Some(url);
            }
            tracing::debug!("Skipping already visited URL: {}", url);
        }
        None
    }

    /// Number of URLs claimed so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of URLs waiting in the queue
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
