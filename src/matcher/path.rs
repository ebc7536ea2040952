//! Aggregating path matcher
//!
//! [`PathMatcher`] is the entry point traversal code calls once per
//! discovered path. It folds ordered "only" and "except" rule lists plus
//! caller predicates into one pass/fail decision, with filesystem-aware
//! disambiguation of tri-state pattern results.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use tracing::trace;

use super::types::{MatchResult, Matcher, Predicate};
use crate::pattern::{MatchOptions, PathPattern, Scope};
use crate::probe::{DiskProbe, TypeProbe};

/// What may be supplied to `only()` / `except()`: a pattern string, or any
/// already-built matcher. Anything else is rejected by the type system, so
/// the wrong-argument class of configuration error cannot reach `matches()`.
pub enum Rule {
    Pattern(String),
    Matcher(Arc<dyn Matcher>),
}

impl From<&str> for Rule {
    fn from(pattern: &str) -> Self {
        Rule::Pattern(pattern.to_string())
    }
}

impl From<String> for Rule {
    fn from(pattern: String) -> Self {
        Rule::Pattern(pattern)
    }
}

impl From<Arc<dyn Matcher>> for Rule {
    fn from(matcher: Arc<dyn Matcher>) -> Self {
        Rule::Matcher(matcher)
    }
}

/// A compiled rule list entry. Pattern entries keep their source string so
/// flag changes (`case_sensitive`, `disable_filesystem_check`) can recompile
/// them under the new configuration.
#[derive(Clone)]
enum Entry {
    Pattern { raw: String, compiled: PathPattern },
    Matcher(Arc<dyn Matcher>),
}

impl Entry {
    fn eval(&self, path: &str) -> MatchResult {
        match self {
            Entry::Pattern { compiled, .. } => compiled.matches(path),
            Entry::Matcher(matcher) => matcher.matches(path),
        }
    }
}

/// Pass/fail matcher over ordered pattern lists and predicate callbacks.
///
/// Decision per path: the "only" list passes, no "except" rule matches, and
/// every callback approves. All configuration methods return a new matcher;
/// an assembled instance is immutable and may be shared across threads.
///
/// With filesystem checking enabled (the default), a trailing `/` on a
/// pattern string scopes it to directories (the slash is consumed before
/// compilation) and its absence scopes it to files. With checking disabled
/// every pattern is unscoped and a trailing slash is an ordinary literal.
#[derive(Clone)]
pub struct PathMatcher {
    only: Vec<Entry>,
    except: Vec<Entry>,
    callbacks: Vec<Predicate>,
    case_sensitive: bool,
    check_filesystem: bool,
    probe: Arc<dyn TypeProbe>,
}

impl PathMatcher {
    /// Matcher that passes every path: case-insensitive, filesystem checking
    /// enabled, no rules.
    pub fn new() -> Self {
        Self {
            only: Vec::new(),
            except: Vec::new(),
            callbacks: Vec::new(),
            case_sensitive: false,
            check_filesystem: true,
            probe: DiskProbe::shared(),
        }
    }

    /// New matcher with the given rules appended to the "only" list.
    pub fn only<I, R>(&self, rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<Rule>,
    {
        let mut next = self.clone();
        for rule in rules {
            let entry = next.compile_rule(rule.into())?;
            next.only.push(entry);
        }
        Ok(next)
    }

    /// New matcher with the given rules appended to the "except" list.
    pub fn except<I, R>(&self, rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<Rule>,
    {
        let mut next = self.clone();
        for rule in rules {
            let entry = next.compile_rule(rule.into())?;
            next.except.push(entry);
        }
        Ok(next)
    }

    /// New matcher with an additional predicate callback. Callbacks run in
    /// registration order after the pattern lists agree; the first returning
    /// false vetoes the path.
    pub fn callback<F>(&self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.callbacks.push(Arc::new(predicate));
        next
    }

    /// New matcher comparing case-sensitively. Existing pattern rules are
    /// recompiled under the new flag.
    pub fn case_sensitive(&self) -> Result<Self> {
        let mut next = self.clone();
        next.case_sensitive = true;
        next.rebuild()
    }

    /// New matcher that never probes the filesystem. Existing pattern rules
    /// are recompiled as unscoped.
    pub fn disable_filesystem_check(&self) -> Result<Self> {
        let mut next = self.clone();
        next.check_filesystem = false;
        next.rebuild()
    }

    /// New matcher using `probe` for type checks (tests, virtual trees).
    pub fn with_probe(&self, probe: Arc<dyn TypeProbe>) -> Result<Self> {
        let mut next = self.clone();
        next.probe = probe;
        next.rebuild()
    }

    /// Decide whether `path` is included.
    ///
    /// Total: always returns a definite boolean, regardless of probe
    /// failures or raced filesystem changes.
    pub fn matches(&self, path: &str) -> bool {
        let included =
            self.only_passes(path) && !self.except_matches(path) && self.callbacks_pass(path);
        trace!(path, included, "path match decision");
        included
    }

    /// Evaluate the "only" list. Every entry is inspected (no short-circuit)
    /// because the fallback rules below need to know whether any entry said
    /// a definitive no versus merely having no opinion.
    fn only_passes(&self, path: &str) -> bool {
        if self.only.is_empty() {
            return true;
        }
        let mut matched = false;
        let mut definitive_no = false;
        let mut indeterminate = false;
        for entry in &self.only {
            match entry.eval(path) {
                MatchResult::Match => matched = true,
                MatchResult::NoMatch => definitive_no = true,
                MatchResult::Indeterminate => indeterminate = true,
            }
        }
        if matched {
            return true;
        }
        if !self.check_filesystem {
            return false;
        }
        if self.probe.is_file(path) {
            // A file passes when every non-match was merely indeterminate.
            !definitive_no
        } else if self.probe.is_dir(path) {
            // A directory stays traversable while some file-scoped pattern
            // below it could still match.
            indeterminate
        } else {
            false
        }
    }

    fn except_matches(&self, path: &str) -> bool {
        self.except.iter().any(|entry| entry.eval(path).is_match())
    }

    fn callbacks_pass(&self, path: &str) -> bool {
        self.callbacks.iter().all(|predicate| predicate(path))
    }

    fn compile_rule(&self, rule: Rule) -> Result<Entry> {
        match rule {
            Rule::Matcher(matcher) => Ok(Entry::Matcher(matcher)),
            Rule::Pattern(raw) => {
                let compiled = Self::compile_pattern(
                    &raw,
                    self.case_sensitive,
                    self.check_filesystem,
                    self.probe.clone(),
                )?;
                Ok(Entry::Pattern { raw, compiled })
            }
        }
    }

    fn compile_pattern(
        raw: &str,
        case_sensitive: bool,
        check_filesystem: bool,
        probe: Arc<dyn TypeProbe>,
    ) -> Result<PathPattern> {
        let options = MatchOptions {
            case_sensitive,
            ..MatchOptions::default()
        };
        if !check_filesystem {
            return PathPattern::new(raw, Scope::Unscoped, options, probe);
        }
        match raw.strip_suffix('/') {
            Some(stripped) => PathPattern::new(stripped, Scope::DirectoriesOnly, options, probe),
            None => PathPattern::new(raw, Scope::FilesOnly, options, probe),
        }
    }

    /// Recompile every pattern entry under the current flags and probe.
    fn rebuild(mut self) -> Result<Self> {
        let case_sensitive = self.case_sensitive;
        let check_filesystem = self.check_filesystem;
        let probe = self.probe.clone();
        for entry in self.only.iter_mut().chain(self.except.iter_mut()) {
            if let Entry::Pattern { raw, compiled } = entry {
                *compiled =
                    Self::compile_pattern(raw, case_sensitive, check_filesystem, probe.clone())?;
            }
        }
        Ok(self)
    }
}

impl Default for PathMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher for PathMatcher {
    fn matches(&self, path: &str) -> MatchResult {
        PathMatcher::matches(self, path).into()
    }
}

impl fmt::Debug for PathMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathMatcher")
            .field("only", &self.only.len())
            .field("except", &self.except.len())
            .field("callbacks", &self.callbacks.len())
            .field("case_sensitive", &self.case_sensitive)
            .field("check_filesystem", &self.check_filesystem)
            .finish()
    }
}
