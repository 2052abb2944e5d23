//! Test fixtures: a mocked Tushare endpoint and servers wired to it.

use std::time::Duration;

use rmcp::model::CallToolResult;
use serde_json::{Value, json};
use stock_core::{TushareClient, TushareConfig};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::StockMcp;

/// Starts a mock endpoint answering every POST with `body`.
pub async fn mock_upstream(body: Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    server
}

pub fn server_for(mock: &MockServer) -> StockMcp {
    let url = mock.uri().parse().expect("mock server url");
    let config = TushareConfig::new(url)
        .with_token("test-token")
        .with_timeout(Duration::from_secs(5));
    StockMcp::new(TushareClient::new(config).expect("client builds"))
}

pub fn server_without_token() -> StockMcp {
    let url = "http://127.0.0.1:1/".parse().expect("static url");
    StockMcp::new(TushareClient::new(TushareConfig::new(url)).expect("client builds"))
}

/// Success envelope carrying `items`.
pub fn envelope(items: Value) -> Value {
    let count = items.as_array().map_or(0, Vec::len);
    json!({
        "request_id": "test-request",
        "code": 0,
        "msg": "",
        "data": { "fields": [], "items": items, "has_more": false, "count": count }
    })
}

pub fn rate_limited() -> Value {
    json!({ "request_id": "test-request", "code": 2, "msg": "rate limited", "data": null })
}

/// Text of the first content block of a tool result.
pub fn result_text(result: &CallToolResult) -> Option<&str> {
    result
        .content
        .first()
        .and_then(|content| content.as_text())
        .map(|text| text.text.as_str())
}
