//! Filesystem-scoped patterns
//!
//! Wraps a [`WildcardPattern`] with a file/directory scope and produces the
//! tri-state [`MatchResult`] that the aggregating matchers consume.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;

use super::wildcard::{MatchOptions, WildcardPattern};
use crate::matcher::{MatchResult, Matcher};
use crate::probe::{DiskProbe, TypeProbe};

/// Restricts which filesystem entry types a pattern applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    FilesOnly,
    DirectoriesOnly,
    Unscoped,
}

/// One wildcard pattern plus a filesystem-type scope.
///
/// Scoped evaluation consults the probe; `Unscoped` never touches the
/// filesystem. Immutable after construction.
#[derive(Clone)]
pub struct PathPattern {
    glob: WildcardPattern,
    scope: Scope,
    probe: Arc<dyn TypeProbe>,
}

impl PathPattern {
    /// Compile a scoped pattern. Glob syntax errors surface here.
    pub fn new(
        pattern: &str,
        scope: Scope,
        options: MatchOptions,
        probe: Arc<dyn TypeProbe>,
    ) -> Result<Self> {
        Ok(Self {
            glob: WildcardPattern::compile(pattern, options)?,
            scope,
            probe,
        })
    }

    /// Compile an unscoped pattern with the default disk probe.
    pub fn unscoped(pattern: &str, options: MatchOptions) -> Result<Self> {
        Self::new(pattern, Scope::Unscoped, options, DiskProbe::shared())
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn source(&self) -> &str {
        self.glob.source()
    }

    /// True if the glob matches any ancestor directory prefix of `path`.
    ///
    /// This is what makes a directory pattern cover its descendants: `logs`
    /// matched against `logs/app.log` inspects the prefix `logs`.
    fn ancestor_matches(&self, path: &str) -> bool {
        path.match_indices('/')
            .any(|(idx, _)| self.glob.is_match(&path[..idx]))
    }
}

impl Matcher for PathPattern {
    fn matches(&self, path: &str) -> MatchResult {
        match self.scope {
            Scope::Unscoped => self.glob.is_match(path).into(),
            Scope::FilesOnly => {
                // A directory gets no opinion: a file below it could still
                // match, so the walker must be able to descend.
                if self.probe.is_dir(path) {
                    MatchResult::Indeterminate
                } else {
                    self.glob.is_match(path).into()
                }
            }
            Scope::DirectoriesOnly => {
                // Gitignore reading of `logs/`: the directory itself, every
                // directory below it, and every file below it all match.
                // A known file never matches on its own name.
                if !self.probe.is_file(path) && self.glob.is_match(path) {
                    return MatchResult::Match;
                }
                self.ancestor_matches(path).into()
            }
        }
    }
}

impl fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathPattern")
            .field("pattern", &self.glob.source())
            .field("scope", &self.scope)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::MemoryProbe;

    fn pattern(raw: &str, scope: Scope, probe: Arc<dyn TypeProbe>) -> PathPattern {
        PathPattern::new(raw, scope, MatchOptions::default(), probe).unwrap()
    }

    #[test]
    fn test_unscoped_never_probes() {
        let p = PathPattern::unscoped("*.txt", MatchOptions::default()).unwrap();
        assert_eq!(p.matches("note.txt"), MatchResult::Match);
        assert_eq!(p.matches("note.md"), MatchResult::NoMatch);
    }

    #[test]
    fn test_file_scope_is_indeterminate_for_directories() {
        let probe = MemoryProbe::new(&["build.log"], &["logs"]);
        let p = pattern("*.log", Scope::FilesOnly, probe);
        assert_eq!(p.matches("logs"), MatchResult::Indeterminate);
        assert_eq!(p.matches("build.log"), MatchResult::Match);
        // Unknown type still evaluates the glob.
        assert_eq!(p.matches("gone.log"), MatchResult::Match);
        assert_eq!(p.matches("gone.txt"), MatchResult::NoMatch);
    }

    #[test]
    fn test_directory_scope_covers_descendants() {
        let probe = MemoryProbe::new(
            &["logs/app.log", "other/app.log"],
            &["logs", "logs/archive"],
        );
        let p = pattern("logs", Scope::DirectoriesOnly, probe);
        assert_eq!(p.matches("logs"), MatchResult::Match);
        assert_eq!(p.matches("logs/app.log"), MatchResult::Match);
        assert_eq!(p.matches("logs/archive"), MatchResult::Match);
        assert_eq!(p.matches("other/app.log"), MatchResult::NoMatch);
        assert_eq!(p.matches("other"), MatchResult::NoMatch);
    }

    #[test]
    fn test_directory_scope_ignores_file_with_same_name() {
        // A plain file named `logs` is not the directory `logs/`.
        let probe = MemoryProbe::new(&["logs"], &[]);
        let p = pattern("logs", Scope::DirectoriesOnly, probe);
        assert_eq!(p.matches("logs"), MatchResult::NoMatch);
    }

    #[test]
    fn test_directory_scope_on_unknown_type() {
        // Raced deletion: type unknown, so the path itself is still eligible.
        let probe = MemoryProbe::new(&[], &[]);
        let p = pattern("logs", Scope::DirectoriesOnly, probe);
        assert_eq!(p.matches("logs"), MatchResult::Match);
        assert_eq!(p.matches("other"), MatchResult::NoMatch);
    }
}
