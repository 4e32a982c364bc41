//! Core data types: options, override rules and the loaded configuration

pub mod config;
pub mod options;
pub mod rule;

pub use config::Config;
pub use options::{ArrowParens, EndOfLine, FormattingOptions, OptionsPatch, TrailingComma};
pub use rule::OverrideRule;
