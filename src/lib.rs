//! fmtrc: formatter configuration resolver
//!
//! Loads a formatter configuration file, validates it against a known option
//! schema and resolves the effective options for any file path by applying
//! pattern-scoped overrides in declaration order.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let config = fmtrc::load_config(Path::new(".prettierrc.json"))?;
//! let options = config.resolve(Path::new("src/App.svelte"));
//! println!("{}", options.print_width);
//! # Ok::<(), fmtrc::ConfigError>(())
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod resolve;
pub mod utils;

pub use config::{find_and_load, load, load_config, ConfigError};
pub use domain::{Config, FormattingOptions, OptionsPatch, OverrideRule, TrailingComma};
pub use resolve::resolve_for;
