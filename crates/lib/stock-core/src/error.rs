use std::error::Error;
use std::fmt;
use std::time::Duration;

/// Failures surfaced by [`crate::TushareClient`].
///
/// Display strings are the localized text the tools embed in their replies.
#[derive(Debug)]
pub enum TushareError {
    /// No token configured; the call is not sent.
    MissingToken,
    /// The HTTP client could not be constructed.
    Client(reqwest::Error),
    Network {
        api_name: String,
        source: reqwest::Error,
    },
    Timeout {
        api_name: String,
        after: Duration,
    },
    Cancelled {
        api_name: String,
    },
    Http {
        status: u16,
    },
    /// The envelope carried a non-zero `code`.
    Upstream {
        code: i64,
        message: String,
    },
    /// The body was not a valid envelope or a record broke its positional contract.
    Decode {
        api_name: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for TushareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken => write!(f, "TUSHARE_TOKEN 环境变量未设置"),
            Self::Client(err) => write!(f, "无法创建 HTTP 客户端: {err}"),
            Self::Network { api_name, source } => {
                write!(f, "调用 Tushare API 失败: {api_name}: {source}")
            }
            Self::Timeout { api_name, after } => {
                write!(f, "调用 Tushare API 超时: {api_name} ({}s)", after.as_secs_f64())
            }
            Self::Cancelled { api_name } => write!(f, "调用 Tushare API 已取消: {api_name}"),
            Self::Http { status } => write!(f, "HTTP error! status: {status}"),
            Self::Upstream { message, .. } => write!(f, "Tushare API 错误: {message}"),
            Self::Decode { api_name, source } => {
                write!(f, "Tushare API 响应格式错误: {api_name}: {source}")
            }
        }
    }
}

impl Error for TushareError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Client(err) | Self::Network { source: err, .. } => Some(err),
            Self::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl TushareError {
    pub(crate) fn transport(api_name: &str, after: Duration, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                api_name: api_name.to_string(),
                after,
            }
        } else {
            Self::Network {
                api_name: api_name.to_string(),
                source,
            }
        }
    }

    pub(crate) fn decode(api_name: &str, source: serde_json::Error) -> Self {
        Self::Decode {
            api_name: api_name.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_is_embedded() {
        let err = TushareError::Upstream {
            code: 2,
            message: "rate limited".to_string(),
        };

        assert_eq!(err.to_string(), "Tushare API 错误: rate limited");
    }

    #[test]
    fn http_error_names_status() {
        let err = TushareError::Http { status: 502 };

        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn timeout_names_operation() {
        let err = TushareError::Timeout {
            api_name: "daily".to_string(),
            after: Duration::from_millis(1500),
        };

        assert_eq!(err.to_string(), "调用 Tushare API 超时: daily (1.5s)");
    }
}
