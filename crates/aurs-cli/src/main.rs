//! # aurs-cli
//!
//! Command-line AUR search client.
//!
//! This is the main entry point for the `aurs` binary. It handles command
//! parsing, sets up logging, and dispatches to the command handlers.

use anyhow::Context;
use aurs_core::types::SearchField;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::CommandContext;
use output::OutputFormat;

/// Concurrent AUR search client
#[derive(Parser)]
#[command(name = "aurs", version, about = "Search the Arch User Repository")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Cap results emitted per term; -1 or 0 means unbounded
    #[arg(long, global = true, default_value_t = -1, allow_hyphen_values = true)]
    pub limit: i64,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Field separator for the raw format
    #[arg(long, global = true, default_value = "=")]
    pub sep: String,

    /// Enable per-result diagnostics and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the AUR, one concurrent lookup per term
    Search {
        /// Search terms
        #[arg(required = true)]
        terms: Vec<String>,
        /// Field to match: name, name-desc, maintainer, depends,
        /// makedepends, optdepends, checkdepends
        #[arg(long, default_value = "name")]
        by: SearchField,
    },
    /// Show detailed information for the named packages
    Info {
        /// Package names
        #[arg(required = true)]
        packages: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    run_cli(cli)
}

fn run_cli(cli: Cli) -> anyhow::Result<()> {
    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    rt.block_on(async {
        let ctx = CommandContext::new(cli.format, cli.sep, cli.limit, cli.verbose);
        if let Err(err) = commands::dispatch_command(cli.command, &ctx).await {
            ctx.output.error(&err.to_string());
            if let Some(suggestion) = err.suggestion() {
                ctx.output.info(suggestion);
            }
            return Err(err.into());
        }
        Ok(())
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    // Logs go to stderr; stdout is reserved for machine-readable output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "aurs_cli={level},aurs_rpc={level},aurs_search={level}"
            ))
        }))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
