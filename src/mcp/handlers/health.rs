//! Backend health check handler

use tracing::info;

use crate::error::classify;
use crate::zoekt::ZoektClient;

use super::ToolOutput;

pub async fn handle_health(client: &ZoektClient) -> ToolOutput {
    let list = client.list("").await.map_err(|fault| classify(&fault))?;
    info!(url = %client.base_url(), repos = list.repo_count(), "zoekt backend healthy");

    let mut output = format!(
        "Zoekt backend at {} is healthy ({} repositories indexed).\n",
        client.base_url(),
        list.repo_count()
    );
    if list.crashes > 0 {
        output.push_str(&format!(
            "Warning: {} index shards failed to load.\n",
            list.crashes
        ));
    }
    Ok(output)
}
