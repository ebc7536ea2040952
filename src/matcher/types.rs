//! Shared matcher types
//!
//! The tri-state [`MatchResult`] and the [`Matcher`] capability that every
//! composable building block implements.

use std::sync::Arc;

/// Three-valued outcome of evaluating a matcher against one path.
///
/// `Indeterminate` means "this matcher has no opinion for this path", e.g. a
/// file-scoped pattern evaluated against a directory. Consumers must never
/// collapse it into `NoMatch`: aggregation rules depend on the distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Match,
    NoMatch,
    Indeterminate,
}

impl MatchResult {
    pub fn is_match(self) -> bool {
        matches!(self, MatchResult::Match)
    }

    /// True for `Match` and `NoMatch`, false for `Indeterminate`.
    pub fn is_definitive(self) -> bool {
        !matches!(self, MatchResult::Indeterminate)
    }
}

impl From<bool> for MatchResult {
    fn from(matched: bool) -> Self {
        if matched {
            MatchResult::Match
        } else {
            MatchResult::NoMatch
        }
    }
}

/// Capability shared by all composable matchers.
///
/// Implementations are immutable once built, so a single instance may be
/// queried concurrently from parallel tree walkers without locking.
pub trait Matcher: Send + Sync {
    fn matches(&self, path: &str) -> MatchResult;
}

/// Caller-supplied predicate consulted by [`PathMatcher`](super::PathMatcher)
/// after the pattern lists agree.
pub type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bool() {
        assert_eq!(MatchResult::from(true), MatchResult::Match);
        assert_eq!(MatchResult::from(false), MatchResult::NoMatch);
    }

    #[test]
    fn test_definitive() {
        assert!(MatchResult::Match.is_definitive());
        assert!(MatchResult::NoMatch.is_definitive());
        assert!(!MatchResult::Indeterminate.is_definitive());
        assert!(MatchResult::Match.is_match());
        assert!(!MatchResult::Indeterminate.is_match());
    }
}
