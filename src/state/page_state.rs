//! Page state definitions for tracking crawl progress
//!
//! Every URL claimed from the frontier ends in exactly one of these states.

use std::fmt;

/// Outcome of a page taken from the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Success States =====
    /// Page was fetched, its courses indexed and its links queued
    Processed,

    // ===== Error States =====
    /// Page returned HTTP 404 or 410
    DeadLink,

    /// Page could not be reached (connection refused, DNS failure, timeout)
    Unreachable,

    /// Page Content-Type is not HTML
    ContentMismatch,

    /// Page fetch failed for other reasons (HTTP error, unreadable body)
    Failed,
}

impl PageState {
    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed)
    }

    /// Returns true if this represents an error state
    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Short snake_case name used in logs and statistics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::DeadLink => "dead_link",
            Self::Unreachable => "unreachable",
            Self::ContentMismatch => "content_mismatch",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
