//! # Pathsieve - Path Matching for Selective File Operations
//!
//! A gitignore-style path matching engine. An external tree walker asks a
//! matcher once per discovered path whether that path belongs to the
//! operation at hand (copy, find, delete-contents); this crate answers.
//!
//! ## Features
//!
//! - **Wildcard compilation**: `*`, `?`, `[...]`, `\` escapes, compiled once
//!   via globset and reused per candidate
//! - **Tri-state evaluation**: Match / NoMatch / Indeterminate, so "no
//!   opinion" is never mistaken for "no"
//! - **Filesystem scoping**: file-only and directory-only patterns with a
//!   pluggable type probe
//! - **Composition**: only/except lists, predicate callbacks, and ANY/ALL
//!   combinators over arbitrary matchers
//! - **Immutable builders**: every configuration step returns a new matcher,
//!   safe to share across parallel walkers
//!
//! ## Quick start
//!
//! ```
//! use pathsieve::PathMatcher;
//!
//! # fn main() -> anyhow::Result<()> {
//! let matcher = PathMatcher::new()
//!     .disable_filesystem_check()?
//!     .only(["*.css", "*.js"])?
//!     .except(["theme.css"])?;
//!
//! assert!(matcher.matches("main.css"));
//! assert!(!matcher.matches("theme.css"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod matcher;
pub mod pattern;
pub mod probe;

pub use config::FilterConfig;
pub use matcher::{Combine, CompositeMatcher, MatchResult, Matcher, PathMatcher, Predicate, Rule};
pub use pattern::{MatchOptions, PathPattern, Scope, WildcardPattern};
pub use probe::{DiskProbe, TypeProbe};

/// Result type alias for pathsieve operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
