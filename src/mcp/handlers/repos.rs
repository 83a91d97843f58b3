//! Repository listing handler

use crate::mcp::constants::DEFAULT_REPO_LIMIT;
use crate::mcp::format::format_repo_page;
use crate::mcp::types::ListReposRequest;
use crate::pagination::paginate;
use crate::zoekt::query::repo_list_query;
use crate::zoekt::ZoektClient;

use super::{cursor_arg, resolve_limit, ToolOutput};

pub async fn handle_list_repos(client: &ZoektClient, req: &ListReposRequest) -> ToolOutput {
    let limit = resolve_limit(req.limit, DEFAULT_REPO_LIMIT)?;
    let query = repo_list_query(req.filter.as_deref());

    let page = paginate(&query, limit, cursor_arg(&req.cursor), |count| {
        client.list_repos(&query, count)
    })
    .await?;

    Ok(format_repo_page(&page, &query))
}
