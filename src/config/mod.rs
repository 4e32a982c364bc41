//! Configuration loading and validation
//!
//! Reads a config file (JSON, YAML, TOML or the `prettier` key of a
//! `package.json`), validates it against the option schema and compiles its
//! overrides into a [`Config`](crate::domain::Config).

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ParseError, SchemaError};
pub use loader::{discover_config, find_and_load, load, load_config, ConfigFormat};
