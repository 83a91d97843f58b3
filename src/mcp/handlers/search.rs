//! Content search handler

use crate::mcp::constants::{DEFAULT_CONTEXT_LINES, DEFAULT_SEARCH_LIMIT};
use crate::mcp::format::format_match_page;
use crate::mcp::types::SearchRequest;
use crate::pagination::paginate;
use crate::zoekt::query::search_query;
use crate::zoekt::ZoektClient;

use super::{cursor_arg, require, resolve_context_lines, resolve_limit, ToolOutput};

pub async fn handle_search(client: &ZoektClient, req: &SearchRequest) -> ToolOutput {
    let text = require("query", &req.query)?;
    let limit = resolve_limit(req.limit, DEFAULT_SEARCH_LIMIT)?;
    let context_lines = resolve_context_lines(req.context_lines, DEFAULT_CONTEXT_LINES)?;

    let query = search_query(
        text,
        req.repo.as_deref(),
        req.lang.as_deref(),
        req.file.as_deref(),
        req.case_sensitive.unwrap_or(false),
    );

    let page = paginate(&query, limit, cursor_arg(&req.cursor), |count| {
        client.search_files(&query, count, context_lines)
    })
    .await?;

    Ok(format_match_page(&page, "files", &query))
}
