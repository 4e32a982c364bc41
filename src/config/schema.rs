//! Option schema and document validation
//!
//! Every recognized key is listed once in [`OPTION_SPECS`] with its type and
//! default. Keys not listed there are passed through untouched as extensions.

use super::error::SchemaError;
use crate::domain::options::{
    ArrowParens, EndOfLine, OptionsPatch, TrailingComma, DEFAULT_BRACKET_SPACING,
    DEFAULT_PRINT_WIDTH, DEFAULT_SEMI, DEFAULT_SINGLE_QUOTE, DEFAULT_TAB_WIDTH, DEFAULT_USE_TABS,
};
use crate::domain::OverrideRule;
use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const OVERRIDES_KEY: &str = "overrides";
const SCHEMA_KEY: &str = "$schema";
const ROOT_KEY: &str = "<root>";
const PATTERNS_EXPECTED: &str = "glob pattern or non-empty array of glob patterns";

/// Type a recognized key must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Boolean,
    String,
    Enum(&'static [&'static str]),
}

impl ValueKind {
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Integer => value.as_u64().is_some_and(|n| n <= u64::from(u32::MAX)),
            Self::Boolean => value.is_boolean(),
            Self::String => value.is_string(),
            Self::Enum(variants) => value.as_str().is_some_and(|s| variants.iter().any(|v| *v == s)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Integer => "non-negative integer".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::String => "string".to_string(),
            Self::Enum(variants) => {
                let quoted: Vec<String> = variants.iter().map(|v| format!("\"{}\"", v)).collect();
                format!("one of {}", quoted.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Integer(u32),
    Boolean(bool),
    Text(&'static str),
    /// No default; the key stays unset unless configured.
    Unset,
}

impl DefaultValue {
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Self::Integer(n) => Some(Value::from(*n)),
            Self::Boolean(b) => Some(Value::Bool(*b)),
            Self::Text(s) => Some(Value::from(*s)),
            Self::Unset => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    PrintWidth,
    TabWidth,
    UseTabs,
    Semi,
    SingleQuote,
    BracketSpacing,
    TrailingComma,
    ArrowParens,
    EndOfLine,
    Parser,
}

#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub key: OptionKey,
    /// Name as written in config files.
    pub name: &'static str,
    pub kind: ValueKind,
    pub default: DefaultValue,
    pub description: &'static str,
}

pub const OPTION_SPECS: &[OptionSpec] = &[
    OptionSpec {
        key: OptionKey::PrintWidth,
        name: "printWidth",
        kind: ValueKind::Integer,
        default: DefaultValue::Integer(DEFAULT_PRINT_WIDTH),
        description: "Line length the formatter wraps at",
    },
    OptionSpec {
        key: OptionKey::TabWidth,
        name: "tabWidth",
        kind: ValueKind::Integer,
        default: DefaultValue::Integer(DEFAULT_TAB_WIDTH),
        description: "Spaces per indentation level",
    },
    OptionSpec {
        key: OptionKey::UseTabs,
        name: "useTabs",
        kind: ValueKind::Boolean,
        default: DefaultValue::Boolean(DEFAULT_USE_TABS),
        description: "Indent with tabs instead of spaces",
    },
    OptionSpec {
        key: OptionKey::Semi,
        name: "semi",
        kind: ValueKind::Boolean,
        default: DefaultValue::Boolean(DEFAULT_SEMI),
        description: "Terminate statements with semicolons",
    },
    OptionSpec {
        key: OptionKey::SingleQuote,
        name: "singleQuote",
        kind: ValueKind::Boolean,
        default: DefaultValue::Boolean(DEFAULT_SINGLE_QUOTE),
        description: "Prefer single quotes for strings",
    },
    OptionSpec {
        key: OptionKey::BracketSpacing,
        name: "bracketSpacing",
        kind: ValueKind::Boolean,
        default: DefaultValue::Boolean(DEFAULT_BRACKET_SPACING),
        description: "Spaces inside object literal braces",
    },
    OptionSpec {
        key: OptionKey::TrailingComma,
        name: "trailingComma",
        kind: ValueKind::Enum(TrailingComma::VARIANTS),
        default: DefaultValue::Text(TrailingComma::All.as_str()),
        description: "Trailing separators in multi-line lists",
    },
    OptionSpec {
        key: OptionKey::ArrowParens,
        name: "arrowParens",
        kind: ValueKind::Enum(ArrowParens::VARIANTS),
        default: DefaultValue::Text(ArrowParens::Always.as_str()),
        description: "Parentheses around a sole arrow function parameter",
    },
    OptionSpec {
        key: OptionKey::EndOfLine,
        name: "endOfLine",
        kind: ValueKind::Enum(EndOfLine::VARIANTS),
        default: DefaultValue::Text(EndOfLine::Lf.as_str()),
        description: "Line ending style",
    },
    OptionSpec {
        key: OptionKey::Parser,
        name: "parser",
        kind: ValueKind::String,
        default: DefaultValue::Unset,
        description: "Parser the formatter should use",
    },
];

static SPECS_BY_NAME: Lazy<HashMap<&'static str, &'static OptionSpec>> =
    Lazy::new(|| OPTION_SPECS.iter().map(|spec| (spec.name, spec)).collect());

/// Spec for a recognized key, or `None` for an extension key.
pub fn lookup(name: &str) -> Option<&'static OptionSpec> {
    SPECS_BY_NAME.get(name).copied()
}

/// Result of validating a whole config document.
#[derive(Debug, Default)]
pub struct ValidatedDocument {
    pub base: OptionsPatch,
    pub overrides: Vec<OverrideRule>,
}

/// Validate a parsed config document.
///
/// `null` (an empty YAML file, a `package.json` without a `prettier` key) is
/// treated as an empty document.
pub fn validate_document(document: &Value) -> Result<ValidatedDocument, SchemaError> {
    let map = match document {
        Value::Null => return Ok(ValidatedDocument::default()),
        Value::Object(map) => map,
        other => return Err(SchemaError::new(ROOT_KEY, "object", other)),
    };

    if map.contains_key(SCHEMA_KEY) {
        tracing::warn!("Ignoring {} key", SCHEMA_KEY);
    }

    let overrides = match map.get(OVERRIDES_KEY) {
        Some(value) => validate_overrides(value)?,
        None => Vec::new(),
    };

    let options: Map<String, Value> = map
        .iter()
        .filter(|(name, _)| name.as_str() != OVERRIDES_KEY && name.as_str() != SCHEMA_KEY)
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    let base = validate_options(&options, "")?;

    Ok(ValidatedDocument { base, overrides })
}

/// Validate an options map into a patch.
///
/// `prefix` is prepended to key names in error messages.
pub fn validate_options(map: &Map<String, Value>, prefix: &str) -> Result<OptionsPatch, SchemaError> {
    let mut patch = OptionsPatch::default();

    for (name, value) in map {
        let Some(spec) = lookup(name) else {
            patch.extensions.insert(name.clone(), value.clone());
            continue;
        };

        let invalid = || SchemaError::new(join_key(prefix, name), spec.kind.describe(), value);
        if !spec.kind.accepts(value) {
            return Err(invalid());
        }
        set_option(&mut patch, spec.key, value).ok_or_else(invalid)?;
    }

    Ok(patch)
}

fn set_option(patch: &mut OptionsPatch, key: OptionKey, value: &Value) -> Option<()> {
    match key {
        OptionKey::PrintWidth => patch.print_width = Some(as_u32(value)?),
        OptionKey::TabWidth => patch.tab_width = Some(as_u32(value)?),
        OptionKey::UseTabs => patch.use_tabs = Some(value.as_bool()?),
        OptionKey::Semi => patch.semi = Some(value.as_bool()?),
        OptionKey::SingleQuote => patch.single_quote = Some(value.as_bool()?),
        OptionKey::BracketSpacing => patch.bracket_spacing = Some(value.as_bool()?),
        OptionKey::TrailingComma => patch.trailing_comma = Some(TrailingComma::parse(value.as_str()?)?),
        OptionKey::ArrowParens => patch.arrow_parens = Some(ArrowParens::parse(value.as_str()?)?),
        OptionKey::EndOfLine => patch.end_of_line = Some(EndOfLine::parse(value.as_str()?)?),
        OptionKey::Parser => patch.parser = Some(value.as_str()?.to_string()),
    }
    Some(())
}

fn as_u32(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|n| u32::try_from(n).ok())
}

fn validate_overrides(value: &Value) -> Result<Vec<OverrideRule>, SchemaError> {
    let Value::Array(entries) = value else {
        return Err(SchemaError::new(OVERRIDES_KEY, "array of override objects", value));
    };

    entries.iter().enumerate().map(|(index, entry)| validate_override(index, entry)).collect()
}

fn validate_override(index: usize, entry: &Value) -> Result<OverrideRule, SchemaError> {
    let key = format!("{}[{}]", OVERRIDES_KEY, index);
    let Value::Object(entry) = entry else {
        return Err(SchemaError::new(key, "object with `files` and `options`", entry));
    };

    if let Some((name, value)) =
        entry.iter().find(|(name, _)| !matches!(name.as_str(), "files" | "excludeFiles" | "options"))
    {
        return Err(SchemaError::new(
            join_key(&key, name),
            "no such key (allowed: `files`, `excludeFiles`, `options`)",
            value,
        ));
    }

    let files_key = join_key(&key, "files");
    let files = match entry.get("files") {
        Some(value) => pattern_list(value, &files_key)?,
        None => return Err(SchemaError::missing(files_key, PATTERNS_EXPECTED)),
    };

    let exclude_key = join_key(&key, "excludeFiles");
    let exclude_files = match entry.get("excludeFiles") {
        Some(value) => pattern_list(value, &exclude_key)?,
        None => Vec::new(),
    };

    let options_key = join_key(&key, "options");
    let options = match entry.get("options") {
        Some(Value::Object(map)) => validate_options(map, &options_key)?,
        Some(other) => return Err(SchemaError::new(options_key, "object", other)),
        None => OptionsPatch::default(),
    };

    let in_excludes = |pattern: &str| exclude_files.iter().any(|p| p == pattern);
    OverrideRule::new(files, exclude_files.clone(), options).map_err(|e| SchemaError {
        key: if in_excludes(&e.pattern) { exclude_key } else { files_key },
        expected: "glob pattern".to_string(),
        actual: format!("\"{}\" ({})", e.pattern, e.message),
    })
}

fn pattern_list(value: &Value, key: &str) -> Result<Vec<String>, SchemaError> {
    match value {
        Value::String(pattern) => Ok(vec![pattern.clone()]),
        Value::Array(items) if !items.is_empty() => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| SchemaError::new(key, PATTERNS_EXPECTED, value))
            })
            .collect(),
        _ => Err(SchemaError::new(key, PATTERNS_EXPECTED, value)),
    }
}

fn join_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}
