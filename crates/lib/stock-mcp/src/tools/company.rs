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
use stock_core::records::StockCompany;
use stock_core::{CancellationToken, Params, ResponseData};

use super::Operation;
use crate::format::{Unit, Val, write_more_note};
use crate::helpers::{self, ToolText};
use crate::StockMcp;

const STOCK_COMPANY: Operation = Operation {
    api_name: "stock_company",
    label: "获取上市公司基本信息",
};

/// Parameters for listed company profiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct StockCompanyParams {
    #[schemars(description = "股票代码")]
    pub ts_code: Option<String>,
    #[schemars(description = "交易所代码，SSE上交所 SZSE深交所 BSE北交所")]
    pub exchange: Option<String>,
}

#[tool_router(router = tool_router_company, vis = "pub")]
impl StockMcp {
    #[tool(description = "获取上市公司基本信息")]
    async fn stock_company(
        &self,
        Parameters(params): Parameters<StockCompanyParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(helpers::tool_result(
            self.query_stock_company(&params, &context.ct).await,
        ))
    }
}

impl StockMcp {
    pub(crate) async fn query_stock_company(
        &self,
        params: &StockCompanyParams,
        cancel: &CancellationToken,
    ) -> ToolText {
        let query = Params::new()
            .with_optional("ts_code", params.ts_code.as_deref())
            .with_optional("exchange", params.exchange.as_deref());
        self.run_query(
            &STOCK_COMPANY,
            query,
            cancel,
            |data: &ResponseData<StockCompany>| CompanyReport(data).to_string(),
        )
        .await
    }
}

struct CompanyReport<'a>(&'a ResponseData<StockCompany>);

impl fmt::Display for CompanyReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = &self.0.items;
        if items.is_empty() {
            return f.write_str("未找到符合条件的上市公司信息。");
        }

        writeln!(f, "共找到{}家上市公司信息：\n", items.len())?;
        for (index, company) in items.iter().enumerate() {
            writeln!(
                f,
                "{}. {} ({})",
                index + 1,
                Val(company.com_name.as_deref()),
                company.ts_code
            )?;
            writeln!(f, "   统一社会信用代码: {}", Val(company.com_id.as_deref()))?;
            writeln!(f, "   交易所: {}", Val(company.exchange.as_deref()))?;
            writeln!(f, "   法人代表: {}", Val(company.chairman.as_deref()))?;
            writeln!(f, "   总经理: {}", Val(company.manager.as_deref()))?;
            writeln!(f, "   董秘: {}", Val(company.secretary.as_deref()))?;
            writeln!(f, "   注册资本: {}", Unit(company.reg_capital, "万元"))?;
            writeln!(f, "   注册日期: {}", Val(company.setup_date.as_deref()))?;
            writeln!(f, "   所在省市: {}", Location(company))?;
            writeln!(f, "   公司主页: {}", Val(company.website.as_deref()))?;
            writeln!(f, "   电子邮件: {}", Val(company.email.as_deref()))?;
            writeln!(f, "   办公地址: {}", Val(company.office.as_deref()))?;
            writeln!(f, "   员工人数: {}", Unit(company.employees, "人"))?;
            writeln!(f, "   公司简介: {}", Val(company.introduction.as_deref()))?;
            writeln!(f, "   经营范围: {}", Val(company.business_scope.as_deref()))?;
            writeln!(f, "   主要业务: {}\n", Val(company.main_business.as_deref()))?;
        }
        write_more_note(f, self.0.has_more)
    }
}

/// Province and city run together, as in `广东深圳市`.
struct Location<'a>(&'a StockCompany);

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.0.province.as_deref(), self.0.city.as_deref()) {
            (None, None) => f.write_str("-"),
            (province, city) => {
                write!(f, "{}{}", province.unwrap_or_default(), city.unwrap_or_default())
            }
        }
    }
}
