//! MCP tool modules.
//!
//! Each data tool copies the supplied inputs into request params, makes one
//! upstream call through [`StockMcp::run_query`], and renders the rows as text.
//! `current_time` reads the local clock and never touches the network.

mod bars;
mod clock;
mod company;
mod ipo;
mod realtime;

use serde::de::DeserializeOwned;
use stock_core::{CancellationToken, Params, ResponseData};
use tracing::{error, info};

use crate::StockMcp;
use crate::helpers::ToolText;

/// Fixed upstream operation behind a tool.
pub struct Operation {
    pub api_name: &'static str,
    /// Human description; also prefixes failure messages.
    pub label: &'static str,
}

impl StockMcp {
    pub(crate) async fn run_query<R, F>(
        &self,
        operation: &Operation,
        params: Params,
        cancel: &CancellationToken,
        render: F,
    ) -> ToolText
    where
        R: DeserializeOwned,
        F: FnOnce(&ResponseData<R>) -> String,
    {
        info!(api_name = operation.api_name, ?params, "{}", operation.label);
        match self
            .client
            .call::<R>(operation.api_name, &params, cancel)
            .await
        {
            Ok(data) => Ok(render(&data)),
            Err(err) => {
                let message = format!("{}失败: {err}", operation.label);
                error!(api_name = operation.api_name, "{message}");
                Err(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use stock_core::CancellationToken;

    use super::bars::{DailyParams, MonthlyParams, WeeklyParams};
    use super::company::StockCompanyParams;
    use super::ipo::IpoNewShareParams;
    use super::realtime::RtKParams;
    use crate::StockMcp;
    use crate::helpers::ToolText;
    use crate::testing;

    fn monthly_params() -> MonthlyParams {
        MonthlyParams {
            ts_code: "000001.SZ".to_string(),
            start_date: "20240101".to_string(),
            end_date: "20240331".to_string(),
        }
    }

    async fn run_every_data_tool(server: &StockMcp) -> Vec<ToolText> {
        let cancel = CancellationToken::new();
        vec![
            server
                .query_new_share(
                    &IpoNewShareParams {
                        start_date: "20240101".to_string(),
                        end_date: "20240131".to_string(),
                    },
                    &cancel,
                )
                .await,
            server
                .query_stock_company(&StockCompanyParams::default(), &cancel)
                .await,
            server.query_daily(&DailyParams::default(), &cancel).await,
            server
                .query_rt_k(
                    &RtKParams {
                        ts_code: "600000.SH".to_string(),
                    },
                    &cancel,
                )
                .await,
            server.query_weekly(&WeeklyParams::default(), &cancel).await,
            server.query_monthly(&monthly_params(), &cancel).await,
        ]
    }

    #[tokio::test]
    async fn missing_token_fails_every_data_tool() {
        let server = testing::server_without_token();

        for outcome in run_every_data_tool(&server).await {
            let message = outcome.expect_err("data tools need a token");
            assert!(message.contains("TUSHARE_TOKEN 环境变量未设置"), "{message}");
        }
    }

    #[tokio::test]
    async fn upstream_error_is_returned_as_text() {
        let mock = testing::mock_upstream(testing::rate_limited()).await;
        let server = testing::server_for(&mock);
        let labels = [
            "获取新股IPO信息失败",
            "获取上市公司基本信息失败",
            "获取股票每日行情数据失败",
            "获取实时日K线行情失败",
            "获取股票每周行情数据失败",
            "获取股票每月行情数据失败",
        ];

        let outcomes = run_every_data_tool(&server).await;
        for (outcome, label) in outcomes.into_iter().zip(labels) {
            let message = outcome.expect_err("code 2 is a failure");
            assert!(message.starts_with(label), "{message}");
            assert!(message.contains("rate limited"), "{message}");
        }
    }

    #[tokio::test]
    async fn empty_payload_yields_not_found_sentences() {
        let mock = testing::mock_upstream(testing::envelope(serde_json::json!([]))).await;
        let server = testing::server_for(&mock);
        let expected = [
            "未找到符合条件的新股IPO信息。",
            "未找到符合条件的上市公司信息。",
            "未找到符合条件的股票行情数据。",
            "未找到符合条件的实时行情数据。",
            "未找到符合条件的股票周行情数据。",
            "未找到符合条件的股票月行情数据。",
        ];

        let outcomes = run_every_data_tool(&server).await;
        for (outcome, sentence) in outcomes.into_iter().zip(expected) {
            assert_eq!(outcome.expect("empty is not an error"), sentence);
        }
    }

    #[tokio::test]
    async fn null_items_yield_not_found_sentence() {
        let mock = testing::mock_upstream(serde_json::json!({
            "request_id": "test-request",
            "code": 0,
            "msg": "",
            "data": { "fields": ["ts_code"], "items": null, "has_more": false, "count": 0 }
        }))
        .await;
        let server = testing::server_for(&mock);

        let text = server
            .query_daily(&DailyParams::default(), &CancellationToken::new())
            .await
            .expect("null items are not an error");

        assert_eq!(text, "未找到符合条件的股票行情数据。");
    }
}
