use chrono::{Local, NaiveDateTime};
use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    tool,
    tool_router,
};
use tracing::info;

use crate::StockMcp;

#[tool_router(router = tool_router_clock, vis = "pub")]
impl StockMcp {
    #[tool(description = "获取当前时间（年月日时分秒）")]
    async fn current_time(&self) -> Result<CallToolResult, ErrorData> {
        info!("获取当前时间");
        let text = render_current_time(Local::now().naive_local());
        info!(current_time = %text, "成功获取当前时间");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

fn render_current_time(now: NaiveDateTime) -> String {
    format!("当前时间: {}", now.format("%Y-%m-%d %H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn pads_every_component() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|date| date.and_hms_opt(7, 8, 9))
            .expect("valid timestamp");

        assert_eq!(render_current_time(now), "当前时间: 2024-03-05 07:08:09");
    }

    #[tokio::test]
    async fn works_without_upstream_configuration() {
        let server = crate::testing::server_without_token();

        let result = server.current_time().await.expect("clock tool succeeds");

        assert_eq!(result.is_error, Some(false));
        let text = crate::testing::result_text(&result).expect("text content");
        assert!(text.starts_with("当前时间: "));
        assert_eq!(text.chars().count(), "当前时间: ".chars().count() + 19);
        assert!(server.tool_names().iter().any(|name| name == "current_time"));
    }
}
