//! Glob matching for override rules

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use thiserror::Error;

/// A glob pattern that failed to compile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid glob pattern '{pattern}': {message}")]
pub struct PatternError {
    pub pattern: String,
    pub message: String,
}

/// Compiled set of file patterns.
///
/// Patterns without a `/` are tested against the file name only, so `*.svelte`
/// matches `src/App.svelte`. Patterns with a `/` are tested against the whole
/// path relative to the config directory. `*` never crosses a separator.
#[derive(Debug, Clone)]
pub struct PatternSet {
    by_name: GlobSet,
    by_path: GlobSet,
}

impl PatternSet {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, PatternError> {
        let mut by_name = GlobSetBuilder::new();
        let mut by_path = GlobSetBuilder::new();

        for raw in patterns {
            let raw = raw.as_ref();
            let pattern = raw.trim_start_matches("./").trim_start_matches('/');
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| PatternError { pattern: raw.to_string(), message: e.kind().to_string() })?;

            if pattern.contains('/') {
                by_path.add(glob);
            } else {
                by_name.add(glob);
            }
        }

        let build = |builder: GlobSetBuilder| {
            builder.build().map_err(|e| PatternError {
                pattern: patterns.iter().map(|p| p.as_ref()).collect::<Vec<_>>().join(", "),
                message: e.to_string(),
            })
        };

        Ok(Self { by_name: build(by_name)?, by_path: build(by_path)? })
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty() && self.by_path.is_empty()
    }

    /// `path` must already be normalized to forward slashes.
    pub fn is_match(&self, path: &str) -> bool {
        let path = path.trim_start_matches("./");
        let name = path.rsplit('/').next().unwrap_or(path);
        self.by_name.is_match(name) || self.by_path.is_match(path)
    }
}

/// Include and exclude patterns of one override rule.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    include: PatternSet,
    exclude: PatternSet,
}

impl FileMatcher {
    pub fn new<S: AsRef<str>>(files: &[S], exclude_files: &[S]) -> Result<Self, PatternError> {
        Ok(Self { include: PatternSet::new(files)?, exclude: PatternSet::new(exclude_files)? })
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.include.is_match(path) && !self.exclude.is_match(path)
    }
}
