//! Wildcard pattern compilation
//!
//! Compiles one glob-style pattern into a reusable predicate over candidate
//! path strings. The grammar is `*` (any sequence, crossing `/` only when
//! slash-exactness is off), `?` (one character), `[...]` (character class),
//! and `\` (escape). Nothing else is a metacharacter.

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobMatcher};

/// Comparison-mode flags for a compiled pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Compare case-sensitively. Off by default: `*.JPG` matches `photo.jpg`.
    pub case_sensitive: bool,
    /// Require the pattern to cover the complete candidate. Off by default,
    /// in which case the candidate matches if any `/`-boundary suffix of it
    /// (including the whole string) matches the pattern.
    pub anchor_full_path: bool,
    /// Keep `*`, `?`, and `[...]` from matching across `/`. On by default.
    pub exact_slashes: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            anchor_full_path: false,
            exact_slashes: true,
        }
    }
}

/// Check if a string contains wildcard pattern characters.
pub fn contains_wildcard(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[') || pattern.contains('\\')
}

/// How the pattern is evaluated against a candidate.
///
/// Metacharacter-free patterns must never go through the general glob path:
/// they degenerate to exact (segment) equality, or to a suffix comparison
/// when the pattern is a single leading `*` followed by a literal tail. This
/// keeps `main.css` from being matched by the literal pattern `in.css`.
#[derive(Debug, Clone)]
enum Compiled {
    /// Exact equality against the (case-folded) pattern.
    Literal(String),
    /// Leading `*` stripped; candidate must end with the (case-folded) tail.
    Suffix(String),
    /// General glob, compiled once via globset.
    Glob(GlobMatcher),
}

/// One glob-style pattern, compiled once and reused for every candidate.
///
/// Immutable after construction; matching never fails and never touches the
/// filesystem.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    source: String,
    options: MatchOptions,
    compiled: Compiled,
}

impl WildcardPattern {
    /// Compile a pattern under the given options.
    ///
    /// Malformed syntax (an unterminated `[` class, a trailing unescaped `\`)
    /// is reported here, never at match time.
    pub fn compile(pattern: &str, options: MatchOptions) -> Result<Self> {
        let compiled = if !contains_wildcard(pattern) {
            Compiled::Literal(fold(pattern, options.case_sensitive))
        } else if let Some(tail) = pattern.strip_prefix('*')
            && !contains_wildcard(tail)
        {
            Compiled::Suffix(fold(tail, options.case_sensitive))
        } else {
            Compiled::Glob(build_glob(pattern, options)?)
        };

        Ok(Self {
            source: pattern.to_string(),
            options,
            compiled,
        })
    }

    /// The pattern string this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Evaluate the pattern against one candidate path string.
    pub fn is_match(&self, candidate: &str) -> bool {
        if self.match_whole(candidate) {
            return true;
        }
        if self.options.anchor_full_path {
            return false;
        }
        // Ends-with mode: retry against every suffix that starts at a path
        // component boundary, so `dir/*.jpg` finds `root/dir/photo.jpg`.
        let mut rest = candidate;
        while let Some(idx) = rest.find('/') {
            rest = &rest[idx + 1..];
            if self.match_whole(rest) {
                return true;
            }
        }
        false
    }

    fn match_whole(&self, candidate: &str) -> bool {
        match &self.compiled {
            Compiled::Literal(literal) => fold(candidate, self.options.case_sensitive) == *literal,
            Compiled::Suffix(tail) => {
                let folded = fold(candidate, self.options.case_sensitive);
                let Some(head) = folded.strip_suffix(tail.as_str()) else {
                    return false;
                };
                // The leading `*` consumed `head`; with exact slashes it may
                // not cross a separator.
                !self.options.exact_slashes || !head.contains('/')
            }
            Compiled::Glob(matcher) => matcher.is_match(candidate),
        }
    }
}

fn fold(s: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        s.to_string()
    } else {
        s.to_lowercase()
    }
}

fn build_glob(pattern: &str, options: MatchOptions) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(&escape_braces(pattern))
        .case_insensitive(!options.case_sensitive)
        .literal_separator(options.exact_slashes)
        .backslash_escape(true)
        .build()
        .with_context(|| format!("invalid wildcard pattern '{pattern}'"))?;
    Ok(glob.compile_matcher())
}

/// Escape `{` and `}` so globset treats them as literals; braces are not part
/// of this engine's grammar. Characters inside a class or behind a `\` are
/// left alone.
fn escape_braces(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut escaped = false;
    let mut in_class = false;
    for c in pattern.chars() {
        if escaped {
            out.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => {
                out.push(c);
                escaped = true;
            }
            '[' if !in_class => {
                out.push(c);
                in_class = true;
            }
            ']' if in_class => {
                out.push(c);
                in_class = false;
            }
            '{' | '}' if !in_class => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(pattern: &str) -> WildcardPattern {
        WildcardPattern::compile(pattern, MatchOptions::default()).unwrap()
    }

    fn compile_with(pattern: &str, options: MatchOptions) -> WildcardPattern {
        WildcardPattern::compile(pattern, options).unwrap()
    }

    #[test]
    fn test_contains_wildcard() {
        assert!(contains_wildcard("*.rs"));
        assert!(contains_wildcard("test?.txt"));
        assert!(contains_wildcard("file[123].txt"));
        assert!(contains_wildcard("literal\\*"));
        assert!(!contains_wildcard("simple.txt"));
        assert!(!contains_wildcard("path/to/file.rs"));
    }

    #[test]
    fn test_literal_matches_trailing_segment_only() {
        let p = compile("readme.md");
        assert!(p.is_match("readme.md"));
        assert!(p.is_match("docs/readme.md"));
        assert!(p.is_match("a/b/readme.md"));
        // Never a substring match.
        assert!(!p.is_match("old-readme.md"));
        assert!(!p.is_match("readme.md.bak"));
        assert!(!p.is_match("docs/old-readme.md"));
    }

    #[test]
    fn test_literal_with_slash() {
        let p = compile("dir/file.txt");
        assert!(p.is_match("dir/file.txt"));
        assert!(p.is_match("root/dir/file.txt"));
        assert!(!p.is_match("otherdir/file.txt"));
        assert!(!p.is_match("file.txt"));
    }

    #[test]
    fn test_suffix_fast_path() {
        let p = compile("*.jpg");
        assert!(p.is_match("photo.jpg"));
        assert!(p.is_match("dir/photo.jpg"));
        assert!(!p.is_match("photo.jpeg"));
        assert!(!p.is_match("photo.jpg.bak"));
    }

    #[test]
    fn test_suffix_respects_exact_slashes_when_anchored() {
        let anchored = MatchOptions {
            anchor_full_path: true,
            ..MatchOptions::default()
        };
        let p = compile_with("*.jpg", anchored);
        assert!(p.is_match("photo.jpg"));
        assert!(!p.is_match("dir/photo.jpg"));

        let loose = MatchOptions {
            anchor_full_path: true,
            exact_slashes: false,
            ..MatchOptions::default()
        };
        let p = compile_with("*.jpg", loose);
        assert!(p.is_match("dir/photo.jpg"));
    }

    #[test]
    fn test_case_folding_default() {
        assert!(compile("*.JPG").is_match("photo.jpg"));
        assert!(compile("README").is_match("readme"));
    }

    #[test]
    fn test_case_sensitive_flag() {
        let options = MatchOptions {
            case_sensitive: true,
            ..MatchOptions::default()
        };
        assert!(!compile_with("*.JPG", options).is_match("photo.jpg"));
        assert!(compile_with("*.JPG", options).is_match("photo.JPG"));
        assert!(!compile_with("README", options).is_match("readme"));
    }

    #[test]
    fn test_star_does_not_cross_slash_by_default() {
        let p = compile("dir/*.jpg");
        assert!(p.is_match("dir/photo.jpg"));
        assert!(!p.is_match("dir/nested/photo.jpg"));
    }

    #[test]
    fn test_star_crosses_slash_when_exactness_off() {
        let options = MatchOptions {
            exact_slashes: false,
            ..MatchOptions::default()
        };
        let p = compile_with("dir/*.jpg", options);
        assert!(p.is_match("dir/photo.jpg"));
        assert!(p.is_match("dir/nested/photo.jpg"));
    }

    #[test]
    fn test_question_mark() {
        let p = compile("file?.txt");
        assert!(p.is_match("file1.txt"));
        assert!(p.is_match("fileA.txt"));
        assert!(!p.is_match("file.txt"));
        assert!(!p.is_match("file12.txt"));
    }

    #[test]
    fn test_character_class() {
        let p = compile("app.log.[0-9]");
        assert!(p.is_match("app.log.1"));
        assert!(p.is_match("logs/app.log.9"));
        assert!(!p.is_match("app.log.x"));
        assert!(!p.is_match("app.log.10"));

        let p = compile("[!abc]x");
        assert!(p.is_match("dx"));
        assert!(!p.is_match("ax"));
    }

    #[test]
    fn test_backslash_escape() {
        let p = compile("data\\*");
        assert!(p.is_match("data*"));
        assert!(!p.is_match("dataset"));
    }

    #[test]
    fn test_braces_are_literal() {
        let p = compile("*.{rs}");
        assert!(p.is_match("main.{rs}"));
        assert!(!p.is_match("main.rs"));
    }

    #[test]
    fn test_malformed_patterns_fail_at_compile_time() {
        assert!(WildcardPattern::compile("file[0-9.txt", MatchOptions::default()).is_err());
        assert!(WildcardPattern::compile("broken\\", MatchOptions::default()).is_err());
    }

    #[test]
    fn test_anchored_full_path() {
        let options = MatchOptions {
            anchor_full_path: true,
            ..MatchOptions::default()
        };
        let p = compile_with("dir/*.jpg", options);
        assert!(p.is_match("dir/photo.jpg"));
        assert!(!p.is_match("root/dir/photo.jpg"));
    }

    #[test]
    fn test_empty_pattern() {
        let p = compile("");
        assert!(p.is_match(""));
        assert!(!p.is_match("a"));
    }
}
