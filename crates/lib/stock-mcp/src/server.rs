//! MCP server runners for stock-mcp.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig,
    StreamableHttpService,
    session::local::LocalSessionManager,
};
use stock_core::TushareClient;
use tracing::info;

use crate::StockMcp;

/// Default bind address for the streamable HTTP transport.
pub const DEFAULT_HTTP_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 4030));

/// Configuration for the MCP streamable HTTP server.
#[derive(Debug, Clone)]
pub struct McpHttpServerConfig {
    pub addr: SocketAddr,
    pub stateful_mode: bool,
    pub sse_keep_alive: Option<Duration>,
    pub sse_retry: Option<Duration>,
}

impl McpHttpServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            stateful_mode: true,
            sse_keep_alive: Some(Duration::from_secs(15)),
            sse_retry: Some(Duration::from_secs(3)),
        }
    }
}

impl Default for McpHttpServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HTTP_ADDR)
    }
}

/// Serves the MCP server over stdio until the peer disconnects.
///
/// # Errors
/// Returns any transport or server error.
pub async fn serve_stdio(
    client: TushareClient,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let service = StockMcp::new(client);
    info!(tools = ?service.tool_names(), "stock-mcp serving over stdio");
    let (stdin, stdout) = stdio();
    let running = serve_server(service, (stdin, stdout)).await?;
    let _ = running.waiting().await?;
    Ok(())
}

/// Serves the MCP server using streamable HTTP transport under `/mcp`.
///
/// # Errors
/// Returns any listener or server error.
pub async fn serve_streamable_http(
    client: TushareClient,
    config: McpHttpServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let service: StreamableHttpService<StockMcp, LocalSessionManager> =
        StreamableHttpService::new(
            move || Ok(StockMcp::new(client.clone())),
            Arc::new(LocalSessionManager::default()),
            StreamableHttpServerConfig {
                sse_keep_alive: config.sse_keep_alive,
                sse_retry: config.sse_retry,
                stateful_mode: config.stateful_mode,
                ..Default::default()
            },
        );

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest_service("/mcp", service);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "stock-mcp serving streamable HTTP");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_config_defaults_to_loopback() {
        let config = McpHttpServerConfig::default();

        assert_eq!(config.addr.to_string(), "127.0.0.1:4030");
        assert!(config.stateful_mode);
        assert_eq!(config.sse_keep_alive, Some(Duration::from_secs(15)));
    }
}
