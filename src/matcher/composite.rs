//! Boolean composition of matchers
//!
//! Combines independently-built matchers under ANY/ALL policies while
//! propagating indeterminacy, so composed filters keep the same tri-state
//! contract as the patterns they are built from.

use std::fmt;
use std::sync::Arc;

use super::types::{MatchResult, Matcher};

/// Combination policy for a [`CompositeMatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combine {
    Any,
    All,
}

/// Ordered children evaluated under one [`Combine`] policy.
///
/// Children are capability-typed (`Arc<dyn Matcher>`), not class-typed, so
/// path patterns, path matchers, and other composites mix freely.
#[derive(Clone)]
pub struct CompositeMatcher {
    children: Vec<Arc<dyn Matcher>>,
    combine: Combine,
}

impl CompositeMatcher {
    /// Matches when any child matches.
    pub fn any<I>(children: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Matcher>>,
    {
        Self {
            children: children.into_iter().collect(),
            combine: Combine::Any,
        }
    }

    /// Matches when no child dissents and at least one child matches.
    pub fn all<I>(children: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Matcher>>,
    {
        Self {
            children: children.into_iter().collect(),
            combine: Combine::All,
        }
    }

    pub fn combine(&self) -> Combine {
        self.combine
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Matcher for CompositeMatcher {
    fn matches(&self, path: &str) -> MatchResult {
        match self.combine {
            Combine::Any => {
                let mut saw_no_match = false;
                for child in &self.children {
                    match child.matches(path) {
                        MatchResult::Match => return MatchResult::Match,
                        MatchResult::NoMatch => saw_no_match = true,
                        MatchResult::Indeterminate => {}
                    }
                }
                if saw_no_match {
                    MatchResult::NoMatch
                } else {
                    MatchResult::Indeterminate
                }
            }
            Combine::All => {
                let mut saw_match = false;
                for child in &self.children {
                    match child.matches(path) {
                        MatchResult::NoMatch => return MatchResult::NoMatch,
                        MatchResult::Match => saw_match = true,
                        MatchResult::Indeterminate => {}
                    }
                }
                if saw_match {
                    MatchResult::Match
                } else {
                    MatchResult::Indeterminate
                }
            }
        }
    }
}

impl fmt::Debug for CompositeMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeMatcher")
            .field("combine", &self.combine)
            .field("children", &self.children.len())
            .finish()
    }
}
