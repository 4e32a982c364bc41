//! Shared helpers

pub mod paths;

pub use paths::{normalize_lexically, normalize_path};
