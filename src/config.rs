//! Declarative filter configuration
//!
//! Host tools that own the traversal (copy, find, delete-contents commands)
//! expose their filter sections as TOML; [`FilterConfig`] is the serde bridge
//! from those sections to a built [`PathMatcher`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::matcher::PathMatcher;

/// Serde-deserializable description of a [`PathMatcher`].
///
/// ```toml
/// only = ["*.css", "*.js"]
/// except = ["theme.css"]
/// case_sensitive = false
/// check_filesystem = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Patterns a path must match to be included; empty means "everything".
    pub only: Vec<String>,
    /// Patterns that exclude a path even when the only-list passes.
    pub except: Vec<String>,
    pub case_sensitive: bool,
    pub check_filesystem: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            only: Vec::new(),
            except: Vec::new(),
            case_sensitive: false,
            check_filesystem: true,
        }
    }
}

impl FilterConfig {
    /// Parse a config from a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid filter configuration")
    }

    /// Build the matcher this config describes. Pattern syntax errors
    /// surface here, before any traversal starts.
    pub fn build(&self) -> Result<PathMatcher> {
        let mut matcher = PathMatcher::new();
        if self.case_sensitive {
            matcher = matcher.case_sensitive()?;
        }
        if !self.check_filesystem {
            matcher = matcher.disable_filesystem_check()?;
        }
        matcher = matcher.only(self.only.iter().map(String::as_str))?;
        matcher = matcher.except(self.except.iter().map(String::as_str))?;
        Ok(matcher)
    }
}
