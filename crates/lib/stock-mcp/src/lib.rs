//! MCP server implementation for stock-mcp.
//!
//! This crate wires the Tushare client into rmcp tool handlers and renders
//! every upstream payload as readable text.

mod format;
mod helpers;
mod tools;
pub mod server;

#[cfg(test)]
mod testing;

use rmcp::{
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool_handler,
};
use rmcp::model::{ServerCapabilities, ServerInfo};
use stock_core::TushareClient;

const SERVER_INSTRUCTIONS: &str = r"stock-mcp answers A-share market questions with data from Tushare Pro.

Tools:
- `ipo_new_share`: IPO calendar between `start_date` and `end_date` (YYYYMMDD).
- `stock_company`: listed company profiles, filtered by `ts_code` and/or `exchange` (SSE, SZSE, BSE).
- `daily`: daily bars; `weekly` and `monthly`: weekly and monthly bars. Filter by `ts_code` (comma separated) and date range.
- `rt_k`: real-time daily candle for `ts_code` (wildcards such as `6.SH` or `301.SZ` are accepted).
- `current_time`: local date and time, useful for building date ranges.

Notes:
- Codes are exchange qualified, e.g. `000001.SZ`, `600000.SH`.
- `monthly` requires `ts_code`, `start_date` and `end_date`.
- Failures are returned as text describing what went wrong.";

/// MCP server exposing the Tushare-backed tools.
#[derive(Clone)]
pub struct StockMcp {
    tool_router: ToolRouter<Self>,
    client: TushareClient,
}

impl StockMcp {
    /// Creates a server whose data tools call through `client`.
    #[must_use]
    pub fn new(client: TushareClient) -> Self {
        let tool_router = Self::tool_router_ipo()
            + Self::tool_router_company()
            + Self::tool_router_bars()
            + Self::tool_router_realtime()
            + Self::tool_router_clock();
        Self {
            tool_router,
            client,
        }
    }

    /// Names of every registered tool.
    #[must_use]
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.into_owned())
            .collect()
    }
}

#[tool_handler]
impl ServerHandler for StockMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing;

    #[test]
    fn registers_all_seven_tools() {
        let server = testing::server_without_token();
        let mut names = server.tool_names();
        names.sort();

        assert_eq!(
            names,
            vec![
                "current_time",
                "daily",
                "ipo_new_share",
                "monthly",
                "rt_k",
                "stock_company",
                "weekly",
            ]
        );
    }
}
