//! File name search handler

use crate::mcp::constants::DEFAULT_FILE_LIMIT;
use crate::mcp::format::format_file_name_page;
use crate::mcp::types::FileSearchRequest;
use crate::pagination::paginate;
use crate::zoekt::query::file_name_query;
use crate::zoekt::ZoektClient;

use super::{cursor_arg, require, resolve_limit, ToolOutput};

pub async fn handle_file_search(client: &ZoektClient, req: &FileSearchRequest) -> ToolOutput {
    let pattern = require("pattern", &req.pattern)?;
    let limit = resolve_limit(req.limit, DEFAULT_FILE_LIMIT)?;
    let query = file_name_query(pattern, req.repo.as_deref());

    let page = paginate(&query, limit, cursor_arg(&req.cursor), |count| {
        client.search_files(&query, count, 0)
    })
    .await?;

    Ok(format_file_name_page(&page, &query))
}
