use rmcp::model::{CallToolResult, Content};

/// Rendered tool text; `Err` carries the localized failure message.
pub type ToolText = Result<String, String>;

/// Wraps tool text in a call result, flagging failures with `is_error`.
pub fn tool_result(outcome: ToolText) -> CallToolResult {
    match outcome {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(message) => CallToolResult::error(vec![Content::text(message)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::result_text;

    #[test]
    fn failure_text_is_flagged_as_error() {
        let result = tool_result(Err("获取新股IPO信息失败: HTTP error! status: 500".to_string()));

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result_text(&result),
            Some("获取新股IPO信息失败: HTTP error! status: 500")
        );
    }

    #[test]
    fn rendered_text_is_a_success() {
        let result = tool_result(Ok("未找到符合条件的新股IPO信息。".to_string()));

        assert_eq!(result.is_error, Some(false));
        assert_eq!(result_text(&result), Some("未找到符合条件的新股IPO信息。"));
        assert_eq!(result.content.len(), 1);
    }
}
