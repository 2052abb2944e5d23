use std::fmt;

use rmcp::{
    ErrorData,
    RoleServer,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    service::RequestContext,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use stock_core::records::RealtimeQuote;
use stock_core::{CancellationToken, Params, ResponseData};

use super::Operation;
use crate::format::{Unit, Val, write_more_note};
use crate::helpers::{self, ToolText};
use crate::StockMcp;

const RT_K: Operation = Operation {
    api_name: "rt_k",
    label: "获取实时日K线行情",
};

/// Parameters for the real-time candle lookup.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RtKParams {
    #[schemars(description = "股票代码，支持通配符方式，e.g. 6.SH、301.SZ、600000.SH")]
    pub ts_code: String,
}

#[tool_router(router = tool_router_realtime, vis = "pub")]
impl StockMcp {
    #[tool(description = "获取实时日K线行情")]
    async fn rt_k(
        &self,
        Parameters(params): Parameters<RtKParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(helpers::tool_result(
            self.query_rt_k(&params, &context.ct).await,
        ))
    }
}

impl StockMcp {
    pub(crate) async fn query_rt_k(
        &self,
        params: &RtKParams,
        cancel: &CancellationToken,
    ) -> ToolText {
        let query = Params::new().with("ts_code", params.ts_code.as_str());
        self.run_query(&RT_K, query, cancel, |data: &ResponseData<RealtimeQuote>| {
            QuoteReport(data).to_string()
        })
        .await
    }
}

struct QuoteReport<'a>(&'a ResponseData<RealtimeQuote>);

impl fmt::Display for QuoteReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = &self.0.items;
        if items.is_empty() {
            return f.write_str("未找到符合条件的实时行情数据。");
        }

        writeln!(f, "共找到{}条实时行情数据：\n", items.len())?;
        for (index, quote) in items.iter().enumerate() {
            writeln!(
                f,
                "{}. {} ({})",
                index + 1,
                Val(quote.name.as_deref()),
                quote.ts_code
            )?;
            writeln!(f, "   昨收价: {}", Val(quote.pre_close))?;
            writeln!(f, "   开盘价: {}", Val(quote.open))?;
            writeln!(f, "   最高价: {}", Val(quote.high))?;
            writeln!(f, "   最低价: {}", Val(quote.low))?;
            writeln!(f, "   最新价: {}", Val(quote.close))?;
            writeln!(f, "   成交量: {}", Unit(quote.vol, "股"))?;
            writeln!(f, "   成交金额: {}", Unit(quote.amount, "元"))?;
            writeln!(f, "   成交笔数: {}\n", Val(quote.num))?;
        }
        write_more_note(f, self.0.has_more)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing;

    #[tokio::test]
    async fn renders_quotes_in_upstream_order() {
        let mock = testing::mock_upstream(testing::envelope(json!([
            ["600000.SH", "浦发银行", 7.05, 7.18, 7.06, 7.01, 7.12, 35_210_000, 250_312_000.5, 18234],
            ["600004.SH", "白云机场", 9.9, 10.02, 9.91, 9.85, 9.97, 4_120_000, 41_000_000, 3120]
        ])))
        .await;
        let server = testing::server_for(&mock);
        let params = RtKParams {
            ts_code: "6*.SH".to_string(),
        };

        let text = server
            .query_rt_k(&params, &CancellationToken::new())
            .await
            .expect("quote lookup succeeds");

        assert!(text.starts_with("共找到2条实时行情数据：\n\n1. 浦发银行 (600000.SH)\n"));
        assert!(text.contains("   开盘价: 7.06\n   最高价: 7.18\n   最低价: 7.01\n   最新价: 7.12\n"));
        assert!(text.contains("   成交量: 35210000股\n"));
        assert!(text.contains("   成交金额: 250312000.5元\n"));
        assert!(text.contains("   成交笔数: 18234\n"));
        let first = text.find("浦发银行").expect("first quote");
        let second = text.find("2. 白云机场 (600004.SH)").expect("second quote");
        assert!(first < second);
    }
}
