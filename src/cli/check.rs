//! Check command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::{absolute_path, load_for};

#[derive(Args)]
pub struct CheckArgs {
    /// Directory to start config discovery from
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Path to config file; skips discovery
    #[arg(short = 'c', long, value_name = "FILE", env = "FMTRC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also print the base options
    #[arg(long)]
    pub print: bool,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let dir = absolute_path(&args.dir)?;
    let config = load_for(&dir, args.config.as_deref())?;

    match &config.source {
        Some(source) => println!("Config: {}", source.display()),
        None => println!("No config found; using defaults"),
    }

    if !config.overrides.is_empty() {
        println!("Overrides:");
        for (index, rule) in config.overrides.iter().enumerate() {
            let mut line = format!("  [{}] {}", index, rule.files().join(", "));
            if !rule.exclude_files().is_empty() {
                line.push_str(&format!(" (excluding {})", rule.exclude_files().join(", ")));
            }
            println!("{}", line);
        }
    }

    if !config.base.extensions.is_empty() {
        let keys: Vec<&str> = config.base.extensions.keys().map(String::as_str).collect();
        println!("Extension keys: {}", keys.join(", "));
    }

    if args.print {
        println!("{}", serde_json::to_string_pretty(&config.base)?);
    }

    Ok(())
}
