//! Configuration loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Source text that is not syntactically valid for its format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse {}{}: {message}", .path.display(), location_suffix(.line, .column))]
pub struct ParseError {
    pub path: PathBuf,
    /// 1-based line, when the parser reports a location.
    pub line: Option<usize>,
    /// 1-based column, when the parser reports a location.
    pub column: Option<usize>,
    pub message: String,
}

fn location_suffix(line: &Option<usize>, column: &Option<usize>) -> String {
    match (*line, *column) {
        (Some(line), Some(column)) => format!(" at line {}, column {}", line, column),
        (Some(line), None) => format!(" at line {}", line),
        _ => String::new(),
    }
}

/// A recognized key holding a value of the wrong type or shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value for `{key}`: expected {expected}, found {actual}")]
pub struct SchemaError {
    /// Dotted key path, e.g. `overrides[0].options.printWidth`.
    pub key: String,
    pub expected: String,
    pub actual: String,
}

impl SchemaError {
    pub fn new(key: impl Into<String>, expected: impl Into<String>, actual: &serde_json::Value) -> Self {
        Self { key: key.into(), expected: expected.into(), actual: describe_value(actual) }
    }

    pub fn missing(key: impl Into<String>, expected: impl Into<String>) -> Self {
        Self { key: key.into(), expected: expected.into(), actual: "nothing".to_string() }
    }
}

fn describe_value(value: &serde_json::Value) -> String {
    let rendered = value.to_string();
    if rendered.chars().count() > 60 {
        let truncated: String = rendered.chars().take(57).collect();
        format!("{}...", truncated)
    } else {
        rendered
    }
}

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("failed to read config {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Syntax error in the source
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Well-formed source with a value of the wrong type
    #[error("invalid config {}: {error}", .path.display())]
    Schema { path: PathBuf, error: SchemaError },
    /// File name maps to no supported format
    #[error("unsupported config file {}: {reason}", .path.display())]
    UnsupportedFormat { path: PathBuf, reason: &'static str },
}

impl ConfigError {
    /// The schema violation, if this is one.
    pub fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            Self::Schema { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_error_display_with_location() {
        let err = ParseError {
            path: PathBuf::from(".fmtrc.json"),
            line: Some(3),
            column: Some(7),
            message: "expected `,`".into(),
        };
        assert_eq!(err.to_string(), "failed to parse .fmtrc.json at line 3, column 7: expected `,`");
    }

    #[test]
    fn test_parse_error_display_without_location() {
        let err = ParseError {
            path: PathBuf::from(".fmtrc.toml"),
            line: Some(2),
            column: None,
            message: "bad".into(),
        };
        assert_eq!(err.to_string(), "failed to parse .fmtrc.toml at line 2: bad");

        let err = ParseError { line: None, ..err };
        assert_eq!(err.to_string(), "failed to parse .fmtrc.toml: bad");
    }

    #[test]
    fn test_schema_error_names_key_type_and_value() {
        let err = SchemaError::new("printWidth", "integer", &json!("wide"));
        assert_eq!(err.to_string(), "invalid value for `printWidth`: expected integer, found \"wide\"");
    }

    #[test]
    fn test_long_values_are_truncated() {
        let long = "x".repeat(200);
        let err = SchemaError::new("parser", "string", &json!([long]));
        assert!(err.actual.ends_with("..."));
        assert_eq!(err.actual.chars().count(), 60);
    }

    #[test]
    fn test_schema_variant_exposes_error() {
        let err = ConfigError::Schema {
            path: PathBuf::from("a.json"),
            error: SchemaError::missing("overrides[0].files", "string or array of strings"),
        };
        assert_eq!(err.schema_error().map(|e| e.actual.as_str()), Some("nothing"));
        assert!(err.to_string().contains("overrides[0].files"));
    }
}
