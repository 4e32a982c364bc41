//! Command-line interface for fmtrc
//!
//! Provides `resolve`, `check` and `schema` subcommands for inspecting
//! formatter configuration.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod check;
mod resolve;
mod schema;
mod utils;

/// Load, validate and resolve formatter configuration
#[derive(Parser)]
#[command(name = "fmtrc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective options for one or more files
    Resolve(resolve::ResolveArgs),

    /// Load and validate a configuration file
    Check(check::CheckArgs),

    /// List the recognized options with their types and defaults
    Schema,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Resolve(args) => resolve::run(args),
        Commands::Check(args) => check::run(args),
        Commands::Schema => schema::run(),
    }
}
