//! `aurs info` command implementation.

use aurs_core::error::AurResult;
use aurs_core::types::SearchRequest;
use tracing::info;

use super::CommandContext;

/// Execute the `aurs info` command
pub async fn execute(packages: Vec<String>, ctx: &CommandContext) -> AurResult<()> {
    info!("Looking up {} package(s)", packages.len());

    let request = SearchRequest::info(packages).with_limit(ctx.limit);
    super::run_request(request, ctx).await
}
