use std::fmt;

/// Lifecycle of a crawl
///
/// `Idle` holds only the seeded frontier, `Running` is the fetch loop, and
/// `Done` is terminal: the accumulated index is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrawlState {
    #[default]
    Idle,
    Running,
    Done,
}

impl CrawlState {
    /// Checks if a transition from this state to another is valid
    pub fn can_transition_to(&self, target: CrawlState) -> bool {
        matches!(
            (self, target),
            (Self::Idle, Self::Running) | (Self::Running, Self::Done)
        )
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Done => "done",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(CrawlState::default(), CrawlState::Idle);
    }

    #[test]
    fn test_valid_transitions() {
        assert!(CrawlState::Idle.can_transition_to(CrawlState::Running));
        assert!(CrawlState::Running.can_transition_to(CrawlState::Done));
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(!CrawlState::Idle.can_transition_to(CrawlState::Done));
        assert!(!CrawlState::Running.can_transition_to(CrawlState::Idle));
        assert!(!CrawlState::Done.can_transition_to(CrawlState::Running));
        assert!(!CrawlState::Done.can_transition_to(CrawlState::Idle));
        assert!(!CrawlState::Running.can_transition_to(CrawlState::Running));
    }

    #[test]
    fn test_display() {
        assert_eq!(CrawlState::Running.to_string(), "running");
    }
}
