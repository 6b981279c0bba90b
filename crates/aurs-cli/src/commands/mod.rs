//! Command implementations and dispatch logic.

use std::sync::Arc;

use aurs_core::error::AurResult;
use aurs_core::types::SearchRequest;
use aurs_rpc::{RpcClient, SearchCache};
use aurs_search::SearchEngine;

pub mod info;
pub mod search;

use crate::output::{OutputFormat, OutputHandler};
use crate::Commands;

/// Shared context for all commands
pub struct CommandContext {
    pub output: OutputHandler,
    pub format: OutputFormat,
    pub sep: String,
    pub limit: i64,
    pub verbose: bool,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(format: OutputFormat, sep: String, limit: i64, verbose: bool) -> Self {
        Self {
            output: OutputHandler::new(),
            format,
            sep,
            limit,
            verbose,
        }
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> AurResult<()> {
    match command {
        Commands::Search { terms, by } => search::execute(terms, by, ctx).await,
        Commands::Info { packages } => info::execute(packages, ctx).await,
    }
}

/// Wire up the engine, run the request, and render the collected results
pub(crate) async fn run_request(request: SearchRequest, ctx: &CommandContext) -> AurResult<()> {
    let client = Arc::new(RpcClient::new()?);
    let cache = Arc::new(SearchCache::new());
    let engine = SearchEngine::new(client, cache).with_verbose(ctx.verbose);

    let results = engine.run(&request).await;
    if results.is_empty() {
        ctx.output.warn("No packages found");
    }
    ctx.output.render(&results, ctx.format, &ctx.sep)
}
