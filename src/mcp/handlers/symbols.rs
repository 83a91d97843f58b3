//! Symbol definition search handler

use crate::mcp::constants::{DEFAULT_CONTEXT_LINES, DEFAULT_SYMBOL_LIMIT};
use crate::mcp::format::format_match_page;
use crate::mcp::types::SymbolSearchRequest;
use crate::pagination::paginate;
use crate::zoekt::query::symbol_query;
use crate::zoekt::ZoektClient;

use super::{cursor_arg, require, resolve_limit, ToolOutput};

pub async fn handle_symbol_search(client: &ZoektClient, req: &SymbolSearchRequest) -> ToolOutput {
    let symbol = require("symbol", &req.symbol)?;
    let limit = resolve_limit(req.limit, DEFAULT_SYMBOL_LIMIT)?;
    let query = symbol_query(symbol, req.repo.as_deref(), req.lang.as_deref());

    let page = paginate(&query, limit, cursor_arg(&req.cursor), |count| {
        client.search_files(&query, count, DEFAULT_CONTEXT_LINES)
    })
    .await?;

    Ok(format_match_page(&page, "files with matching symbols", &query))
}
