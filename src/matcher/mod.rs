//! Matchers: tri-state building blocks and the pass/fail aggregator.

pub mod composite;
pub mod path;
pub mod types;

pub use composite::{Combine, CompositeMatcher};
pub use path::{PathMatcher, Rule};
pub use types::{MatchResult, Matcher, Predicate};
