//! Loaded configuration

use super::options::FormattingOptions;
use super::rule::OverrideRule;
use crate::resolve::resolve_for;
use crate::utils::normalize_lexically;
use std::path::{Path, PathBuf};

/// A validated configuration: base options plus ordered overrides.
///
/// Built once at startup and never mutated afterwards, so one instance can be
/// shared by every formatting worker.
#[derive(Debug, Clone)]
pub struct Config {
    /// File the configuration was read from; `None` when defaults are in use.
    pub source: Option<PathBuf>,
    /// Directory that path-style override patterns are relative to.
    pub root: PathBuf,
    pub base: FormattingOptions,
    pub overrides: Vec<OverrideRule>,
}

impl Config {
    /// Configuration with built-in defaults and no overrides.
    pub fn with_defaults(root: PathBuf) -> Self {
        Self { source: None, root, base: FormattingOptions::default(), overrides: Vec::new() }
    }

    /// Effective options for `path`.
    ///
    /// `.` and `..` are folded first. Absolute paths under `root` are matched
    /// relative to it. Other paths are matched as given.
    pub fn resolve(&self, path: &Path) -> FormattingOptions {
        let path = normalize_lexically(path);
        resolve_for(self.relative_path(&path), &self.base, &self.overrides)
    }

    fn relative_path<'a>(&self, path: &'a Path) -> &'a Path {
        if path.is_absolute() {
            path.strip_prefix(&self.root).unwrap_or(path)
        } else {
            path
        }
    }
}
