//! Whole-file retrieval handler

use crate::error::{classify, Fault};
use crate::mcp::format::format_file_content;
use crate::mcp::types::GetFileRequest;
use crate::zoekt::query::exact_file_query;
use crate::zoekt::ZoektClient;

use super::{require, ToolOutput};

pub async fn handle_get_file(client: &ZoektClient, req: &GetFileRequest) -> ToolOutput {
    let repo = require("repo", &req.repo)?;
    let path = require("path", &req.path)?;
    let query = exact_file_query(repo, path);

    let file = client
        .fetch_file(&query)
        .await
        .map_err(|fault| classify(&fault))?;

    let Some(file) = file else {
        // Zoekt answers an exact-match miss with an empty result
        let fault = Fault::message(format!("file not found: {} in {}", path, repo));
        return Err(classify(&fault)
            .with_detail("repo", repo)
            .with_detail("path", path));
    };

    let content = file.decoded_content().unwrap_or_default();
    Ok(format_file_content(&file, &content))
}
