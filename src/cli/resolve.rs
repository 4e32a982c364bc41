//! Resolve command implementation

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{Map, Value};
use std::path::PathBuf;

use super::utils::{absolute_path, load_for};

#[derive(Args)]
pub struct ResolveArgs {
    /// Files to resolve options for (need not exist)
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Path to config file; skips discovery from the first file's directory
    #[arg(short = 'c', long, value_name = "FILE", env = "FMTRC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print only this option's value
    #[arg(short = 'k', long, value_name = "KEY")]
    pub key: Option<String>,
}

pub fn run(args: ResolveArgs) -> Result<()> {
    let targets = args
        .files
        .iter()
        .map(|file| absolute_path(file))
        .collect::<Result<Vec<_>>>()?;

    let start_dir = match targets.first().and_then(|file| file.parent()) {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let config = load_for(&start_dir, args.config.as_deref())?;
    match &config.source {
        Some(source) => tracing::debug!("Using config {}", source.display()),
        None => tracing::debug!("No config found; using defaults"),
    }

    let mut results = Map::new();
    for (file, target) in args.files.iter().zip(&targets) {
        let resolved = serde_json::to_value(config.resolve(target))
            .with_context(|| format!("Failed serializing options for {}", file.display()))?;
        let entry = match &args.key {
            Some(key) => resolved.get(key).cloned().unwrap_or(Value::Null),
            None => resolved,
        };
        results.insert(file.display().to_string(), entry);
    }

    let output = if args.files.len() == 1 {
        results.into_iter().next().map(|(_, value)| value).unwrap_or(Value::Null)
    } else {
        Value::Object(results)
    };

    match output {
        Value::String(s) if args.key.is_some() => println!("{}", s),
        other => println!("{}", serde_json::to_string_pretty(&other)?),
    }

    Ok(())
}
