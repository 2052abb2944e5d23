//! Daemon entry point for the stock MCP server.
//!
//! Loads configuration from the command line and environment, builds the
//! Tushare client, and serves the MCP protocol over stdio (or streamable HTTP
//! when `--http` is set).

mod config;

use stock_core::TushareClient;
use stock_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::config::StockConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // stdout carries MCP frames; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = StockConfig::from_args()?;
    if !config.has_token() {
        warn!("TUSHARE_TOKEN 未设置，行情类工具调用将返回配置错误");
    }

    let client = TushareClient::new(config.tushare)?;
    if config.http_serve {
        serve_streamable_http(client, McpHttpServerConfig::new(config.http_addr)).await
    } else {
        serve_stdio(client).await
    }
}
