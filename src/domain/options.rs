//! Formatting option records
//!
//! [`FormattingOptions`] is the fully resolved record handed to a formatter.
//! [`OptionsPatch`] is its partial form, produced by validation and carried
//! by override rules.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_PRINT_WIDTH: u32 = 80;
pub const DEFAULT_TAB_WIDTH: u32 = 2;
pub const DEFAULT_USE_TABS: bool = false;
pub const DEFAULT_SEMI: bool = true;
pub const DEFAULT_SINGLE_QUOTE: bool = false;
pub const DEFAULT_BRACKET_SPACING: bool = true;

/// Where trailing separators go in multi-line lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingComma {
    None,
    Es5,
    #[default]
    All,
}

impl TrailingComma {
    pub const VARIANTS: &'static [&'static str] = &["none", "es5", "all"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(Self::None),
            "es5" => Some(Self::Es5),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Es5 => "es5",
            Self::All => "all",
        }
    }
}

/// Parentheses around a sole arrow function parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowParens {
    #[default]
    Always,
    Avoid,
}

impl ArrowParens {
    pub const VARIANTS: &'static [&'static str] = &["always", "avoid"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "always" => Some(Self::Always),
            "avoid" => Some(Self::Avoid),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Avoid => "avoid",
        }
    }
}

/// Line ending written by the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndOfLine {
    #[default]
    Lf,
    Crlf,
    Cr,
    Auto,
}

impl EndOfLine {
    pub const VARIANTS: &'static [&'static str] = &["lf", "crlf", "cr", "auto"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "lf" => Some(Self::Lf),
            "crlf" => Some(Self::Crlf),
            "cr" => Some(Self::Cr),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "lf",
            Self::Crlf => "crlf",
            Self::Cr => "cr",
            Self::Auto => "auto",
        }
    }
}

/// Effective options for one file.
///
/// Every standard key is always set except `parser`, which stays `None`
/// unless the configuration names one. Keys the schema does not recognize
/// are kept verbatim in `extensions` and serialized next to the standard keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattingOptions {
    pub print_width: u32,
    pub tab_width: u32,
    pub use_tabs: bool,
    pub semi: bool,
    pub single_quote: bool,
    pub bracket_spacing: bool,
    pub trailing_comma: TrailingComma,
    pub arrow_parens: ArrowParens,
    pub end_of_line: EndOfLine,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            print_width: DEFAULT_PRINT_WIDTH,
            tab_width: DEFAULT_TAB_WIDTH,
            use_tabs: DEFAULT_USE_TABS,
            semi: DEFAULT_SEMI,
            single_quote: DEFAULT_SINGLE_QUOTE,
            bracket_spacing: DEFAULT_BRACKET_SPACING,
            trailing_comma: TrailingComma::default(),
            arrow_parens: ArrowParens::default(),
            end_of_line: EndOfLine::default(),
            parser: None,
            extensions: Map::new(),
        }
    }
}

impl FormattingOptions {
    /// Defaults with `patch` laid on top.
    pub fn from_patch(patch: &OptionsPatch) -> Self {
        let mut options = Self::default();
        options.apply(patch);
        options
    }

    /// Shallow merge: every key set in `patch` replaces the current value.
    /// Extension values are replaced whole, never merged into.
    pub fn apply(&mut self, patch: &OptionsPatch) {
        if let Some(v) = patch.print_width {
            self.print_width = v;
        }
        if let Some(v) = patch.tab_width {
            self.tab_width = v;
        }
        if let Some(v) = patch.use_tabs {
            self.use_tabs = v;
        }
        if let Some(v) = patch.semi {
            self.semi = v;
        }
        if let Some(v) = patch.single_quote {
            self.single_quote = v;
        }
        if let Some(v) = patch.bracket_spacing {
            self.bracket_spacing = v;
        }
        if let Some(v) = patch.trailing_comma {
            self.trailing_comma = v;
        }
        if let Some(v) = patch.arrow_parens {
            self.arrow_parens = v;
        }
        if let Some(v) = patch.end_of_line {
            self.end_of_line = v;
        }
        if let Some(v) = &patch.parser {
            self.parser = Some(v.clone());
        }
        for (key, value) in &patch.extensions {
            self.extensions.insert(key.clone(), value.clone());
        }
    }
}

/// Partial [`FormattingOptions`]: only the keys a config layer actually sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_tabs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semi: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_quote: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bracket_spacing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_comma: Option<TrailingComma>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrow_parens: Option<ArrowParens>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_of_line: Option<EndOfLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

impl OptionsPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
