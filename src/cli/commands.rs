//! Command implementations for CLI operations
//!
//! Commands run the same handlers as the MCP tools, so output and error
//! rendering match what an MCP client sees.

use anyhow::{anyhow, Result};
use tracing::info;

use crate::config::Config;
use crate::error::format_error;
use crate::mcp::handlers::{self, ToolOutput};
use crate::mcp::types::{ListReposRequest, SearchRequest};
use crate::zoekt::ZoektClient;

/// Options for the search command
#[derive(Debug, Clone, Default)]
pub struct SearchArgs {
    pub query: String,
    pub repo: Option<String>,
    pub lang: Option<String>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

/// Search file contents and print one page
#[tokio::main]
pub async fn search_command(config: &Config, args: SearchArgs) -> Result<()> {
    let client = connect(config)?;
    let req = SearchRequest {
        query: args.query,
        repo: args.repo,
        lang: args.lang,
        limit: args.limit,
        cursor: args.cursor,
        ..Default::default()
    };
    emit(handlers::search::handle_search(&client, &req).await)
}

/// List indexed repositories
#[tokio::main]
pub async fn repos_command(config: &Config, filter: Option<String>, cursor: Option<String>) -> Result<()> {
    let client = connect(config)?;
    let req = ListReposRequest {
        filter,
        cursor,
        ..Default::default()
    };
    emit(handlers::repos::handle_list_repos(&client, &req).await)
}

/// Show index statistics
#[tokio::main]
pub async fn stats_command(config: &Config) -> Result<()> {
    let client = connect(config)?;
    emit(handlers::stats::handle_stats(&client).await)
}

/// Check that the backend answers
#[tokio::main]
pub async fn health_command(config: &Config) -> Result<()> {
    let client = connect(config)?;
    emit(handlers::health::handle_health(&client).await)
}

/// Build a client from configuration
pub fn connect(config: &Config) -> Result<ZoektClient> {
    info!(url = %config.zoekt_url, timeout_ms = config.timeout.as_millis() as u64, "using zoekt backend");
    ZoektClient::new(config.zoekt_url.clone(), config.timeout)
}

/// Print handler output; errors become the command's failure
fn emit(output: ToolOutput) -> Result<()> {
    match output {
        Ok(text) => {
            println!("{}", text);
            Ok(())
        }
        Err(err) => Err(anyhow!(format_error(&err))),
    }
}
