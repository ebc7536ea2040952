//! Pattern compilation: wildcard globs and filesystem-scoped patterns.

pub mod path;
pub mod wildcard;

pub use path::{PathPattern, Scope};
pub use wildcard::{MatchOptions, WildcardPattern, contains_wildcard};
