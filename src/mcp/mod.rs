//! MCP (Model Context Protocol) server implementation
//!
//! Exposes the Zoekt backend as MCP tools:
//! - search: Content search with filters (paginated)
//! - search_symbols: Symbol definition search (paginated)
//! - search_files: File name search (paginated)
//! - list_repos: Indexed repositories (paginated)
//! - get_file: Whole file content
//! - get_stats: Index statistics
//! - health_check: Backend reachability

pub mod constants;
pub mod format;
pub mod handlers;
pub mod types;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use tracing::warn;

use crate::error::format_error;
use crate::zoekt::ZoektClient;
use handlers::ToolOutput;
use types::{
    FileSearchRequest, GetFileRequest, ListReposRequest, SearchRequest, SymbolSearchRequest,
};

/// MCP server handler backed by a zoekt-webserver
///
/// Holds no per-session state; every clone talks to the same backend.
#[derive(Clone)]
pub struct ZoektHandler {
    tool_router: ToolRouter<Self>,
    client: ZoektClient,
}

#[tool_router]
impl ZoektHandler {
    pub fn new(client: ZoektClient) -> Self {
        Self {
            tool_router: Self::tool_router(),
            client,
        }
    }

    /// Search file contents
    #[tool(
        description = "Search code across all indexed repositories. Supports regular expressions and zoekt filters (repo:, lang:, file:, sym:, case:). Results are paginated: pass the returned cursor with the same query to get the next page."
    )]
    async fn search(
        &self,
        Parameters(req): Parameters<SearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond(
            "search",
            handlers::search::handle_search(&self.client, &req).await,
        ))
    }

    /// Search symbol definitions
    #[tool(
        description = "Find where functions, types, methods and other symbols are defined. Results are paginated."
    )]
    async fn search_symbols(
        &self,
        Parameters(req): Parameters<SymbolSearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond(
            "search_symbols",
            handlers::symbols::handle_symbol_search(&self.client, &req).await,
        ))
    }

    /// Search file names
    #[tool(description = "Find files by name or path pattern. Results are paginated.")]
    async fn search_files(
        &self,
        Parameters(req): Parameters<FileSearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond(
            "search_files",
            handlers::files::handle_file_search(&self.client, &req).await,
        ))
    }

    /// List indexed repositories
    #[tool(
        description = "List indexed repositories, optionally filtered by name. Results are paginated."
    )]
    async fn list_repos(
        &self,
        Parameters(req): Parameters<ListReposRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond(
            "list_repos",
            handlers::repos::handle_list_repos(&self.client, &req).await,
        ))
    }

    /// Fetch one file
    #[tool(description = "Get the full content of a file from an indexed repository.")]
    async fn get_file(
        &self,
        Parameters(req): Parameters<GetFileRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond(
            "get_file",
            handlers::file::handle_get_file(&self.client, &req).await,
        ))
    }

    /// Index statistics
    #[tool(
        description = "Get statistics about the search index: repositories, documents, shards and sizes."
    )]
    async fn get_stats(&self) -> Result<CallToolResult, McpError> {
        Ok(respond(
            "get_stats",
            handlers::stats::handle_stats(&self.client).await,
        ))
    }

    /// Backend reachability
    #[tool(description = "Check whether the zoekt backend is reachable and serving an index.")]
    async fn health_check(&self) -> Result<CallToolResult, McpError> {
        Ok(respond(
            "health_check",
            handlers::health::handle_health(&self.client).await,
        ))
    }
}

/// Turn handler output into a tool result; failures are flagged as errors
fn respond(tool: &str, output: ToolOutput) -> CallToolResult {
    match output {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(err) => {
            warn!(tool, code = %err.code, message = %err.message, "tool call failed");
            CallToolResult::error(vec![Content::text(format_error(&err))])
        }
    }
}

#[tool_handler]
impl ServerHandler for ZoektHandler {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "zoekt-mcp searches code indexed by a Zoekt backend. \
                Use search for content, search_symbols for definitions, search_files for file names, \
                and list_repos to discover repositories. Paginated tools return an opaque cursor; \
                pass it back unchanged with the same query to continue."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
