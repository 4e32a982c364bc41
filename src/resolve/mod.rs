//! Per-file option resolution
//!
//! Resolution starts from the base options and lays every matching override
//! on top in declaration order, so later rules win per key.

use crate::domain::{FormattingOptions, OverrideRule};
use crate::utils::normalize_path;
use std::path::Path;

pub mod matcher;

pub use matcher::{FileMatcher, PatternError, PatternSet};

/// Effective options for `path`.
///
/// `path` should be relative to the directory the overrides were declared in.
/// Pure and total: never fails and never touches the filesystem.
pub fn resolve_for(
    path: impl AsRef<Path>,
    base: &FormattingOptions,
    overrides: &[OverrideRule],
) -> FormattingOptions {
    let raw = path.as_ref().to_string_lossy();
    let path = normalize_path(&raw);
    let mut resolved = base.clone();

    for (index, rule) in overrides.iter().enumerate() {
        if rule.matches(&path) {
            tracing::debug!(path = %path, rule = index, files = ?rule.files(), "override matched");
            resolved.apply(rule.options());
        }
    }

    resolved
}
