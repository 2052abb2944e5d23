use std::fmt;
use std::time::Duration;

use reqwest::Url;

/// Default Tushare Pro endpoint.
pub const DEFAULT_API_URL: &str = "https://api.tushare.pro";
/// Default per-call deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the Tushare client.
///
/// The token is optional here: a client without one still builds, and every
/// call it makes fails with [`crate::TushareError::MissingToken`].
#[derive(Clone)]
pub struct TushareConfig {
    pub api_url: Url,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl TushareConfig {
    #[must_use]
    pub const fn new(api_url: Url) -> Self {
        Self {
            api_url,
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for TushareConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TushareConfig")
            .field("api_url", &self.api_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> TushareConfig {
        TushareConfig::new(DEFAULT_API_URL.parse().expect("valid default url"))
    }

    #[test]
    fn new_config_has_no_token() {
        let config = default_config();

        assert_eq!(config.api_url.as_str(), "https://api.tushare.pro/");
        assert!(config.token.is_none());
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = default_config().with_token("secret-token");
        let rendered = format!("{config:?}");

        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("secret-token"));
    }
}
