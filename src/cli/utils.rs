//! Shared CLI utilities.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::find_and_load;
use crate::domain::Config;
use crate::utils::normalize_lexically;

/// Make `path` absolute against the current directory and fold away `.` and
/// `..` without touching the filesystem, so paths that do not exist yet still
/// resolve and config discovery only walks real ancestors.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize_lexically(path));
    }
    let cwd = std::env::current_dir().context("Failed reading current directory")?;
    Ok(normalize_lexically(&cwd.join(path)))
}

/// Load the explicit config when given, otherwise discover one from `start_dir`.
pub fn load_for(start_dir: &Path, config_path: Option<&Path>) -> Result<Config> {
    let config_path = config_path.map(absolute_path).transpose()?;
    find_and_load(start_dir, config_path.as_deref())
        .with_context(|| format!("Failed loading configuration for {}", start_dir.display()))
}
