//! Index statistics handler

use crate::error::classify;
use crate::mcp::format::format_stats;
use crate::zoekt::ZoektClient;

use super::ToolOutput;

pub async fn handle_stats(client: &ZoektClient) -> ToolOutput {
    let list = client.list("").await.map_err(|fault| classify(&fault))?;

    // Older zoekt builds leave the aggregate repo count at zero
    let repo_count = match list.stats.repos {
        0 => list.repo_count(),
        n => n as usize,
    };
    Ok(format_stats(&list.stats, repo_count))
}
