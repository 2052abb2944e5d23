//! Daily, weekly and monthly price bars.
//!
//! All three group rows by instrument code. The daily and the weekly/monthly
//! upstream rows use different field orders, hence the two record types.

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
use stock_core::records::{DailyBar, PeriodBar};
use stock_core::{CancellationToken, Params, ResponseData};

use super::Operation;
use crate::format::{Unit, Val, write_groups, write_more_note};
use crate::helpers::{self, ToolText};
use crate::StockMcp;

const DAILY: Operation = Operation {
    api_name: "daily",
    label: "获取股票每日行情数据",
};

const WEEKLY: Operation = Operation {
    api_name: "weekly",
    label: "获取股票每周行情数据",
};

const MONTHLY: Operation = Operation {
    api_name: "monthly",
    label: "获取股票每月行情数据",
};

/// Optional filters for `daily`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DailyParams {
    #[schemars(description = "股票代码（支持多个股票同时提取，逗号分隔）")]
    pub ts_code: Option<String>,
    #[schemars(description = "开始日期(YYYYMMDD)")]
    pub start_date: Option<String>,
    #[schemars(description = "结束日期(YYYYMMDD)")]
    pub end_date: Option<String>,
}

impl DailyParams {
    fn to_params(&self) -> Params {
        range_params(
            self.ts_code.as_deref(),
            self.start_date.as_deref(),
            self.end_date.as_deref(),
        )
    }
}

/// Optional filters for `weekly`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct WeeklyParams {
    #[schemars(description = "股票代码（支持多个股票同时提取，逗号分隔）eg. 000001.SZ")]
    pub ts_code: Option<String>,
    #[schemars(description = "开始日期(YYYYMMDD)")]
    pub start_date: Option<String>,
    #[schemars(description = "结束日期(YYYYMMDD)")]
    pub end_date: Option<String>,
}

impl WeeklyParams {
    fn to_params(&self) -> Params {
        range_params(
            self.ts_code.as_deref(),
            self.start_date.as_deref(),
            self.end_date.as_deref(),
        )
    }
}

/// Required filters for `monthly`.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct MonthlyParams {
    #[schemars(description = "股票代码（支持多个股票同时提取，逗号分隔）eg. 000001.SZ")]
    pub ts_code: String,
    #[schemars(description = "开始日期(YYYYMMDD)")]
    pub start_date: String,
    #[schemars(description = "结束日期(YYYYMMDD)")]
    pub end_date: String,
}

impl MonthlyParams {
    fn to_params(&self) -> Params {
        range_params(
            Some(self.ts_code.as_str()),
            Some(self.start_date.as_str()),
            Some(self.end_date.as_str()),
        )
    }
}

fn range_params(
    ts_code: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Params {
    Params::new()
        .with_optional("ts_code", ts_code)
        .with_optional("start_date", start_date)
        .with_optional("end_date", end_date)
}

#[tool_router(router = tool_router_bars, vis = "pub")]
impl StockMcp {
    #[tool(description = "获取股票每日行情数据")]
    async fn daily(
        &self,
        Parameters(params): Parameters<DailyParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(helpers::tool_result(
            self.query_daily(&params, &context.ct).await,
        ))
    }

    #[tool(description = "获取股票每周行情数据")]
    async fn weekly(
        &self,
        Parameters(params): Parameters<WeeklyParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(helpers::tool_result(
            self.query_weekly(&params, &context.ct).await,
        ))
    }

    #[tool(description = "获取股票每月行情数据")]
    async fn monthly(
        &self,
        Parameters(params): Parameters<MonthlyParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(helpers::tool_result(
            self.query_monthly(&params, &context.ct).await,
        ))
    }
}

impl StockMcp {
    pub(crate) async fn query_daily(
        &self,
        params: &DailyParams,
        cancel: &CancellationToken,
    ) -> ToolText {
        self.run_query(
            &DAILY,
            params.to_params(),
            cancel,
            |data: &ResponseData<DailyBar>| DailyReport(data).to_string(),
        )
        .await
    }

    pub(crate) async fn query_weekly(
        &self,
        params: &WeeklyParams,
        cancel: &CancellationToken,
    ) -> ToolText {
        self.run_query(
            &WEEKLY,
            params.to_params(),
            cancel,
            |data: &ResponseData<PeriodBar>| PeriodReport::new(data, Period::Week).to_string(),
        )
        .await
    }

    pub(crate) async fn query_monthly(
        &self,
        params: &MonthlyParams,
        cancel: &CancellationToken,
    ) -> ToolText {
        self.run_query(
            &MONTHLY,
            params.to_params(),
            cancel,
            |data: &ResponseData<PeriodBar>| PeriodReport::new(data, Period::Month).to_string(),
        )
        .await
    }
}

struct DailyReport<'a>(&'a ResponseData<DailyBar>);

impl fmt::Display for DailyReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = &self.0.items;
        if items.is_empty() {
            return f.write_str("未找到符合条件的股票行情数据。");
        }

        writeln!(f, "共找到{}条股票行情数据：\n", items.len())?;
        write_groups(f, items, "行情数据", |f, index, bar| {
            writeln!(f, "  {index}. 交易日期: {}", Val(bar.trade_date.as_deref()))?;
            writeln!(
                f,
                "     开盘价: {}, 最高价: {}, 最低价: {}, 收盘价: {}",
                Val(bar.open),
                Val(bar.high),
                Val(bar.low),
                Val(bar.close)
            )?;
            writeln!(
                f,
                "     昨收价: {}, 涨跌额: {}, 涨跌幅: {}",
                Val(bar.pre_close),
                Val(bar.change),
                Unit(bar.pct_chg, "%")
            )?;
            writeln!(
                f,
                "     成交量: {}, 成交额: {}",
                Unit(bar.vol, "手"),
                Unit(bar.amount, "千元")
            )
        })?;
        write_more_note(f, self.0.has_more)
    }
}

#[derive(Debug, Clone, Copy)]
enum Period {
    Week,
    Month,
}

impl Period {
    const fn noun(self) -> &'static str {
        match self {
            Self::Week => "周",
            Self::Month => "月",
        }
    }

    const fn previous_close(self) -> &'static str {
        match self {
            Self::Week => "上周收盘价",
            Self::Month => "上月收盘价",
        }
    }
}

struct PeriodReport<'a> {
    data: &'a ResponseData<PeriodBar>,
    period: Period,
}

impl<'a> PeriodReport<'a> {
    const fn new(data: &'a ResponseData<PeriodBar>, period: Period) -> Self {
        Self { data, period }
    }
}

impl fmt::Display for PeriodReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = &self.data.items;
        let noun = self.period.noun();
        if items.is_empty() {
            return write!(f, "未找到符合条件的股票{noun}行情数据。");
        }

        writeln!(f, "共找到{}条股票{noun}行情数据：\n", items.len())?;
        let heading = format!("{noun}行情数据");
        let previous_close = self.period.previous_close();
        write_groups(f, items, &heading, |f, index, bar| {
            writeln!(f, "  {index}. 交易日期: {}", Val(bar.trade_date.as_deref()))?;
            writeln!(
                f,
                "     开盘价: {}, 最高价: {}, 最低价: {}, 收盘价: {}",
                Val(bar.open),
                Val(bar.high),
                Val(bar.low),
                Val(bar.close)
            )?;
            writeln!(
                f,
                "     {previous_close}: {}, 涨跌额: {}, 涨跌幅: {}",
                Val(bar.pre_close),
                Val(bar.change),
                Unit(bar.pct_chg, "%")
            )?;
            writeln!(f, "     成交量: {}, 成交额: {}", Val(bar.vol), Val(bar.amount))
        })?;
        write_more_note(f, self.data.has_more)
    }
}
