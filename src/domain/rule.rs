//! Pattern-scoped override rules

use super::options::OptionsPatch;
use crate::resolve::matcher::{FileMatcher, PatternError};

/// One entry of the `overrides` list: patterns plus the options they set.
#[derive(Debug, Clone)]
pub struct OverrideRule {
    files: Vec<String>,
    exclude_files: Vec<String>,
    options: OptionsPatch,
    matcher: FileMatcher,
}

impl OverrideRule {
    /// Compile a rule. Fails when any include or exclude pattern is not a valid glob.
    pub fn new(
        files: Vec<String>,
        exclude_files: Vec<String>,
        options: OptionsPatch,
    ) -> Result<Self, PatternError> {
        let matcher = FileMatcher::new(&files, &exclude_files)?;
        Ok(Self { files, exclude_files, options, matcher })
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn exclude_files(&self) -> &[String] {
        &self.exclude_files
    }

    pub fn options(&self) -> &OptionsPatch {
        &self.options
    }

    /// `path` is relative to the config directory, with forward slashes.
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }
}
