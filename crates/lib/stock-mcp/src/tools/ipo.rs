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
use stock_core::records::NewShare;
use stock_core::{CancellationToken, Params, ResponseData};

use super::Operation;
use crate::format::{Unit, Val, write_more_note};
use crate::helpers::{self, ToolText};
use crate::StockMcp;

const NEW_SHARE: Operation = Operation {
    api_name: "new_share",
    label: "获取新股IPO信息",
};

/// Parameters for the IPO calendar lookup.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct IpoNewShareParams {
    #[schemars(description = "上网发行开始日期(YYYYMMDD)")]
    pub start_date: String,
    #[schemars(description = "上网发行结束日期(YYYYMMDD)")]
    pub end_date: String,
}

#[tool_router(router = tool_router_ipo, vis = "pub")]
impl StockMcp {
    #[tool(description = "获取新股IPO信息")]
    async fn ipo_new_share(
        &self,
        Parameters(params): Parameters<IpoNewShareParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(helpers::tool_result(
            self.query_new_share(&params, &context.ct).await,
        ))
    }
}

impl StockMcp {
    pub(crate) async fn query_new_share(
        &self,
        params: &IpoNewShareParams,
        cancel: &CancellationToken,
    ) -> ToolText {
        let query = Params::new()
            .with_optional("start_date", Some(params.start_date.as_str()))
            .with_optional("end_date", Some(params.end_date.as_str()));
        self.run_query(&NEW_SHARE, query, cancel, |data: &ResponseData<NewShare>| {
            NewShareReport(data).to_string()
        })
        .await
    }
}

struct NewShareReport<'a>(&'a ResponseData<NewShare>);

impl fmt::Display for NewShareReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = &self.0.items;
        if items.is_empty() {
            return f.write_str("未找到符合条件的新股IPO信息。");
        }

        writeln!(f, "共找到{}条新股IPO信息：\n", items.len())?;
        for (index, share) in items.iter().enumerate() {
            writeln!(
                f,
                "{}. {} ({})",
                index + 1,
                Val(share.name.as_deref()),
                share.ts_code
            )?;
            writeln!(f, "   申购代码: {}", Val(share.sub_code.as_deref()))?;
            writeln!(f, "   上网发行日期: {}", Val(share.ipo_date.as_deref()))?;
            writeln!(f, "   上市日期: {}", Val(share.issue_date.as_deref()))?;
            writeln!(f, "   发行总量: {}", Unit(share.amount, "万股"))?;
            writeln!(f, "   上网发行量: {}", Unit(share.market_amount, "万股"))?;
            writeln!(f, "   发行价格: {}", Unit(share.price, "元"))?;
            writeln!(f, "   市盈率: {}", Val(share.pe))?;
            writeln!(f, "   个人申购上限: {}", Unit(share.limit_amount, "万股"))?;
            writeln!(f, "   募集资金: {}", Unit(share.funds, "亿元"))?;
            writeln!(f, "   中签率: {}\n", Unit(share.ballot, "%"))?;
        }
        write_more_note(f, self.0.has_more)
    }
}
