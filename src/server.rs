//! MCP server initialization and startup
//!
//! Handles both stdio and HTTP transport modes for the MCP server.

use anyhow::{Context, Result};
use rmcp::{
    transport::stdio,
    transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
    },
    ServiceExt,
};
use tracing::info;

use zoekt_mcp::cli::connect;
use zoekt_mcp::config::Config;
use zoekt_mcp::mcp::ZoektHandler;

/// Start MCP server with stdio transport
#[tokio::main]
pub async fn start_stdio(config: &Config) -> Result<()> {
    info!("Starting zoekt-mcp server (stdio)");

    let handler = ZoektHandler::new(connect(config)?);
    let service = handler
        .serve(stdio())
        .await
        .context("failed to start stdio transport")?;

    info!("MCP server running on stdio");
    service.waiting().await?;

    Ok(())
}

/// Start MCP server with HTTP transport
#[tokio::main]
pub async fn start_http(config: &Config, port: u16) -> Result<()> {
    info!("Starting zoekt-mcp server (HTTP on port {})", port);

    let client = connect(config)?;
    let cancellation_token = tokio_util::sync::CancellationToken::new();

    // Sessions share only the HTTP client; pagination state lives in cursors
    let service = StreamableHttpService::new(
        move || Ok(ZoektHandler::new(client.clone())),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig {
            cancellation_token: cancellation_token.child_token(),
            ..Default::default()
        },
    );

    let router = axum::Router::new().nest_service("/mcp", service);

    let bind_addr = format!("127.0.0.1:{}", port);
    info!("Listening on http://{}/mcp", bind_addr);

    let tcp_listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    axum::serve(tcp_listener, router)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down...");
            cancellation_token.cancel();
        })
        .await?;

    Ok(())
}
