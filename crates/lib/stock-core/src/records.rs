//! Positional record types, one per upstream operation.
//!
//! Tushare returns each row as a bare JSON array. Every struct here is decoded
//! from that array in field declaration order, so the declaration order *is*
//! the wire contract. A row with the wrong arity or a mistyped scalar fails at
//! decode time. Nullable upstream scalars are `Option`.

use serde::Deserialize;

/// Records grouped by their exchange-qualified instrument code.
pub trait Instrument {
    fn ts_code(&self) -> &str;
}

/// `new_share`: upcoming and recent IPOs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewShare {
    pub ts_code: String,
    pub sub_code: Option<String>,
    pub name: Option<String>,
    pub ipo_date: Option<String>,
    pub issue_date: Option<String>,
    /// 发行总量（万股）
    pub amount: Option<f64>,
    /// 上网发行总量（万股）
    pub market_amount: Option<f64>,
    pub price: Option<f64>,
    pub pe: Option<f64>,
    /// 个人申购上限（万股）
    pub limit_amount: Option<f64>,
    /// 募集资金（亿元）
    pub funds: Option<f64>,
    pub ballot: Option<f64>,
}

/// `stock_company`: listed company profile.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StockCompany {
    pub ts_code: String,
    pub com_name: Option<String>,
    pub com_id: Option<String>,
    pub chairman: Option<String>,
    pub manager: Option<String>,
    pub secretary: Option<String>,
    /// 注册资本（万元）
    pub reg_capital: Option<f64>,
    pub setup_date: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub introduction: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub office: Option<String>,
    pub business_scope: Option<String>,
    pub employees: Option<f64>,
    pub main_business: Option<String>,
    pub exchange: Option<String>,
}

/// `daily`: one trading day. Prices come in open, high, low, close order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyBar {
    pub ts_code: String,
    pub trade_date: Option<String>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub pre_close: Option<f64>,
    pub change: Option<f64>,
    pub pct_chg: Option<f64>,
    /// 成交量（手）
    pub vol: Option<f64>,
    /// 成交额（千元）
    pub amount: Option<f64>,
}

/// `weekly` and `monthly`: one period. Unlike [`DailyBar`], close comes first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PeriodBar {
    pub ts_code: String,
    pub trade_date: Option<String>,
    pub close: Option<f64>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub pre_close: Option<f64>,
    pub change: Option<f64>,
    pub pct_chg: Option<f64>,
    pub vol: Option<f64>,
    pub amount: Option<f64>,
}

/// `rt_k`: real-time daily candle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RealtimeQuote {
    pub ts_code: String,
    pub name: Option<String>,
    pub pre_close: Option<f64>,
    pub high: Option<f64>,
    pub open: Option<f64>,
    pub low: Option<f64>,
    /// Latest price.
    pub close: Option<f64>,
    /// 成交量（股）
    pub vol: Option<f64>,
    /// 成交金额（元）
    pub amount: Option<f64>,
    /// Trades since open.
    pub num: Option<f64>,
}

macro_rules! impl_instrument {
    ($($record:ty),* $(,)?) => {
        $(
            impl Instrument for $record {
                fn ts_code(&self) -> &str {
                    &self.ts_code
                }
            }
        )*
    };
}

impl_instrument!(DailyBar, PeriodBar);
