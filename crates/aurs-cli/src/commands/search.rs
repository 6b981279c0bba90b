//! `aurs search` command implementation.

use aurs_core::error::AurResult;
use aurs_core::types::{SearchField, SearchRequest};
use tracing::info;

use super::CommandContext;

/// Execute the `aurs search` command
pub async fn execute(terms: Vec<String>, by: SearchField, ctx: &CommandContext) -> AurResult<()> {
    info!("Searching {} term(s) by {}", terms.len(), by);

    let request = SearchRequest::search(terms, by).with_limit(ctx.limit);
    super::run_request(request, ctx).await
}
