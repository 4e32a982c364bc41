//! Config file loading and discovery

use super::error::{ConfigError, ParseError, SchemaError};
use super::schema::validate_document;
use crate::domain::{Config, FormattingOptions};
use crate::utils::normalize_lexically;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Candidate file names checked in each directory during discovery, in order.
pub const CONFIG_CANDIDATES: &[&str] = &[
    ".fmtrc",
    ".fmtrc.json",
    ".fmtrc.yaml",
    ".fmtrc.yml",
    ".fmtrc.toml",
    ".prettierrc",
    ".prettierrc.json",
    ".prettierrc.yaml",
    ".prettierrc.yml",
    ".prettierrc.toml",
    "package.json",
];

const PACKAGE_JSON: &str = "package.json";
const PACKAGE_JSON_KEY: &str = "prettier";

/// Source format of a config file, chosen from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
    /// JSON whose options live under the `prettier` key.
    PackageJson,
}

impl ConfigFormat {
    pub fn detect(path: &Path) -> Result<Self, ConfigError> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name == PACKAGE_JSON {
            return Ok(Self::PackageJson);
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            "js" | "cjs" | "mjs" | "ts" | "cts" | "mts" => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
                reason: "code modules are not evaluated; use a JSON, YAML or TOML config",
            }),
            // Extensionless rc files such as `.prettierrc` hold YAML or JSON.
            "" if name.starts_with('.') => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
                reason: "expected .json, .yaml, .yml, .toml, package.json or an rc file",
            }),
        }
    }
}

/// Load a config file and return its base options with defaults filled in.
pub fn load(path: &Path) -> Result<FormattingOptions, ConfigError> {
    load_config(path).map(|config| config.base)
}

/// Load and validate a config file, including its overrides.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let format = ConfigFormat::detect(path)?;
    let content = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

    let document = parse_document(&content, path, format)?;
    if format == ConfigFormat::PackageJson && !matches!(document, Value::Object(_) | Value::Null) {
        let error = SchemaError::new(
            PACKAGE_JSON_KEY,
            "object of options (shared config references are not supported)",
            &document,
        );
        return Err(ConfigError::Schema { path: path.to_path_buf(), error });
    }
    let validated = validate_document(&document)
        .map_err(|error| ConfigError::Schema { path: path.to_path_buf(), error })?;

    let root = config_root(path)?;
    tracing::debug!(
        "Loaded config {} ({} overrides, root {})",
        path.display(),
        validated.overrides.len(),
        root.display()
    );

    Ok(Config {
        source: Some(path.to_path_buf()),
        root,
        base: FormattingOptions::from_patch(&validated.base),
        overrides: validated.overrides,
    })
}

/// Absolute directory holding `path`, so absolute file paths can be made
/// relative to it even when the config was named relatively.
fn config_root(path: &Path) -> Result<PathBuf, ConfigError> {
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    if parent.is_absolute() {
        return Ok(normalize_lexically(parent));
    }
    let cwd = std::env::current_dir()
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    Ok(normalize_lexically(&cwd.join(parent)))
}

/// Load `config_path` when given, otherwise the first config discovered from
/// `start_dir` upwards. Falls back to defaults rooted at `start_dir`.
pub fn find_and_load(start_dir: &Path, config_path: Option<&Path>) -> Result<Config, ConfigError> {
    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(start_dir),
    };

    match discovered {
        Some(path) => load_config(&path),
        None => {
            tracing::debug!("No config found from {}; using defaults", start_dir.display());
            Ok(Config::with_defaults(start_dir.to_path_buf()))
        }
    }
}

/// Parse source text into a neutral JSON tree.
pub fn parse_document(content: &str, path: &Path, format: ConfigFormat) -> Result<Value, ParseError> {
    match format {
        ConfigFormat::Json => parse_json(content, path),
        ConfigFormat::Yaml => parse_yaml(content, path),
        ConfigFormat::Toml => parse_toml(content, path),
        ConfigFormat::PackageJson => {
            let mut manifest = parse_json(content, path)?;
            Ok(manifest.get_mut(PACKAGE_JSON_KEY).map(Value::take).unwrap_or(Value::Null))
        }
    }
}

fn parse_json(content: &str, path: &Path) -> Result<Value, ParseError> {
    serde_json::from_str(content).map_err(|e| ParseError {
        path: path.to_path_buf(),
        line: Some(e.line()).filter(|&line| line > 0),
        column: Some(e.column()).filter(|&column| column > 0),
        message: e.to_string(),
    })
}

fn parse_yaml(content: &str, path: &Path) -> Result<Value, ParseError> {
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(content).map_err(|e| {
        let location = e.location();
        ParseError {
            path: path.to_path_buf(),
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
            message: e.to_string(),
        }
    })
}

fn parse_toml(content: &str, path: &Path) -> Result<Value, ParseError> {
    toml::from_str(content).map_err(|e| {
        let (line, column) = match e.span() {
            Some(span) => {
                let (line, column) = line_column(content, span.start);
                (Some(line), Some(column))
            }
            None => (None, None),
        };
        ParseError { path: path.to_path_buf(), line, column, message: e.message().to_string() }
    })
}

/// 1-based line and column of a byte offset.
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(content.len());
    let before = content.get(..offset).unwrap_or(content);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    (line, before[line_start..].chars().count() + 1)
}

/// Walk from `start_dir` up through its ancestors and return the first config
/// file found. A `package.json` only counts when it has a `prettier` key.
pub fn discover_config(start_dir: &Path) -> Option<PathBuf> {
    let start_dir = normalize_lexically(start_dir);
    for dir in start_dir.ancestors() {
        for candidate in CONFIG_CANDIDATES {
            let path = dir.join(candidate);
            if !path.is_file() {
                continue;
            }
            if *candidate == PACKAGE_JSON && !package_json_has_config(&path) {
                continue;
            }
            tracing::debug!("Discovered config {}", path.display());
            return Some(path);
        }
    }

    None
}

fn package_json_has_config(path: &Path) -> bool {
    let Ok(content) = fs::read_to_string(path) else {
        return false;
    };
    match serde_json::from_str::<Value>(&content) {
        Ok(manifest) => manifest.get(PACKAGE_JSON_KEY).is_some(),
        Err(e) => {
            tracing::debug!("Skipping unreadable {}: {}", path.display(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TrailingComma;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).expect("write");
        path
    }

    #[test]
    fn test_load_json_fills_defaults() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(tmp.path(), ".fmtrc.json", r#"{"printWidth": 100, "semi": false}"#);

        let opts = load(&path).expect("config");
        assert_eq!(opts.print_width, 100);
        assert!(!opts.semi);
        assert_eq!(opts.tab_width, 2);
        assert_eq!(opts.trailing_comma, TrailingComma::All);
    }

    #[test]
    fn test_load_yaml_rc_file() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(
            tmp.path(),
            ".prettierrc",
            "printWidth: 80\nsemi: false\nsvelteSortOrder: scripts-markup-styles\noverrides:\n  - files: \"*.svelte\"\n    options:\n      parser: svelte\n",
        );

        let config = load_config(&path).expect("config");
        assert!(!config.base.semi);
        assert_eq!(config.base.extensions["svelteSortOrder"], json!("scripts-markup-styles"));
        assert_eq!(config.overrides.len(), 1);
        assert_eq!(config.root, tmp.path());
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_rc_file_accepts_json() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(tmp.path(), ".fmtrc", r#"{"tabWidth": 4, "useTabs": true}"#);

        let opts = load(&path).expect("config");
        assert_eq!(opts.tab_width, 4);
        assert!(opts.use_tabs);
    }

    #[test]
    fn test_load_toml() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(
            tmp.path(),
            ".fmtrc.toml",
            "printWidth = 120\ntrailingComma = \"es5\"\n\n[[overrides]]\nfiles = [\"*.md\"]\n[overrides.options]\nproseWrap = \"always\"\n",
        );

        let config = load_config(&path).expect("config");
        assert_eq!(config.base.print_width, 120);
        assert_eq!(config.base.trailing_comma, TrailingComma::Es5);
        assert_eq!(config.resolve(Path::new("README.md")).extensions["proseWrap"], json!("always"));
    }

    #[test]
    fn test_package_json_prettier_key() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(tmp.path(), "package.json", r#"{"name": "app", "prettier": {"singleQuote": true}}"#);

        let opts = load(&path).expect("config");
        assert!(opts.single_quote);
        assert!(!opts.extensions.contains_key("name"));
    }

    #[test]
    fn test_package_json_without_key_gives_defaults() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(tmp.path(), "package.json", r#"{"name": "app"}"#);
        assert_eq!(load(&path).expect("config"), FormattingOptions::default());
    }

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(tmp.path(), ".fmtrc.yaml", "\n");
        assert_eq!(load(&path).expect("config"), FormattingOptions::default());
    }

    #[test]
    fn test_invalid_json_is_parse_error_with_location() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(tmp.path(), ".fmtrc.json", "{\n  \"semi\": false,\n  \"printWidth\": \n}");

        match load(&path) {
            Err(ConfigError::Parse(err)) => {
                assert_eq!(err.path, path);
                assert_eq!(err.line, Some(4));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_toml_is_parse_error_with_location() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(tmp.path(), ".fmtrc.toml", "semi = false\nprintWidth = = 3\n");

        match load(&path) {
            Err(ConfigError::Parse(err)) => assert_eq!(err.line, Some(2)),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(tmp.path(), ".fmtrc.yml", "semi: [false\n");
        assert!(matches!(load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_wrong_type_is_schema_error() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(tmp.path(), ".fmtrc.json", r#"{"printWidth": "wide"}"#);

        let err = load(&path).expect_err("schema error");
        let schema = err.schema_error().expect("schema variant");
        assert_eq!(schema.key, "printWidth");
        assert_eq!(schema.actual, "\"wide\"");
    }

    #[test]
    fn test_yaml_quoted_number_is_not_coerced() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(tmp.path(), ".fmtrc.yaml", "tabWidth: \"4\"\n");
        assert!(load(&path).expect_err("schema").schema_error().is_some());
    }

    #[test]
    fn test_js_config_is_unsupported() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(tmp.path(), ".prettierrc.js", "module.exports = {}\n");
        assert!(matches!(load(&path), Err(ConfigError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let tmp = TempDir::new().expect("tmp");
        let result = load(&tmp.path().join(".fmtrc.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_discover_walks_up() {
        let tmp = TempDir::new().expect("tmp");
        let nested = tmp.path().join("a").join("b");
        fs::create_dir_all(&nested).expect("mkdir");
        let path = write(tmp.path(), ".prettierrc.json", "{}");

        assert_eq!(discover_config(&nested), Some(path));
    }

    #[test]
    fn test_discover_prefers_nearest_directory() {
        let tmp = TempDir::new().expect("tmp");
        let nested = tmp.path().join("pkg");
        fs::create_dir_all(&nested).expect("mkdir");
        write(tmp.path(), ".fmtrc", "{}");
        let near = write(&nested, ".prettierrc.yaml", "semi: false\n");

        assert_eq!(discover_config(&nested), Some(near));
    }

    #[test]
    fn test_discover_skips_package_json_without_key() {
        let tmp = TempDir::new().expect("tmp");
        let nested = tmp.path().join("app");
        fs::create_dir_all(&nested).expect("mkdir");
        write(&nested, "package.json", r#"{"name": "app"}"#);
        let outer = write(tmp.path(), ".fmtrc.json", "{}");

        assert_eq!(discover_config(&nested), Some(outer));
    }

    #[test]
    fn test_find_and_load_defaults_when_missing() {
        let tmp = TempDir::new().expect("tmp");
        let config = find_and_load(tmp.path(), None).expect("config");
        assert!(config.source.is_none());
        assert_eq!(config.base, FormattingOptions::default());
        assert_eq!(config.root, tmp.path());
    }

    #[test]
    fn test_find_and_load_explicit_path_wins() {
        let tmp = TempDir::new().expect("tmp");
        write(tmp.path(), ".fmtrc.json", r#"{"semi": false}"#);
        let explicit = write(tmp.path(), "custom.json", r#"{"printWidth": 60}"#);

        let config = find_and_load(tmp.path(), Some(&explicit)).expect("config");
        assert_eq!(config.base.print_width, 60);
        assert!(config.base.semi);
    }

    #[test]
    fn test_package_json_shared_config_reference_is_rejected() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(tmp.path(), "package.json", r#"{"prettier": "@company/prettier-config"}"#);

        let err = load(&path).expect_err("string reference");
        let schema = err.schema_error().expect("schema variant");
        assert_eq!(schema.key, "prettier");
        assert!(schema.expected.contains("shared config references are not supported"));
        assert_eq!(schema.actual, "\"@company/prettier-config\"");
    }

    #[cfg(unix)]
    #[test]
    fn test_relative_config_path_gets_absolute_root() {
        let tmp = TempDir::new().expect("tmp");
        write(
            tmp.path(),
            ".prettierrc.json",
            r#"{"overrides": [{"files": "src/*.js", "options": {"tabWidth": 8}}]}"#,
        );

        // Reach the temp dir relative to the test's working directory.
        let cwd = std::env::current_dir().expect("cwd");
        let ups = "../".repeat(cwd.components().count() - 1);
        let target = tmp.path().join(".prettierrc.json");
        let relative = PathBuf::from(ups).join(target.strip_prefix("/").expect("absolute tmp"));
        assert!(relative.is_relative());

        let config = load_config(&relative).expect("config");
        assert!(config.root.is_absolute());
        assert_eq!(config.root, tmp.path());
        assert_eq!(config.resolve(&tmp.path().join("src").join("a.js")).tab_width, 8);
        assert_eq!(config.resolve(Path::new("src/a.js")).tab_width, 8);
    }

    #[test]
    fn test_discover_ignores_sibling_named_through_parent_dir() {
        let tmp = TempDir::new().expect("tmp");
        let sub = tmp.path().join("sub");
        let other = tmp.path().join("x");
        fs::create_dir_all(&sub).expect("mkdir");
        fs::create_dir_all(&other).expect("mkdir");
        write(&sub, ".fmtrc.json", r#"{"tabWidth": 8}"#);

        assert_eq!(discover_config(&sub.join("..").join("x")), None);
    }

    #[test]
    fn test_line_column() {
        assert_eq!(line_column("ab\ncd", 0), (1, 1));
        assert_eq!(line_column("ab\ncd", 4), (2, 2));
        assert_eq!(line_column("ab", 99), (1, 3));
    }
}
