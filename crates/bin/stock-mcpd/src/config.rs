use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use stock_core::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT};
use stock_core::{TushareConfig, Url};
use stock_mcp::server::DEFAULT_HTTP_ADDR;

const DEFAULT_TIMEOUT_SECS: u64 = DEFAULT_TIMEOUT.as_secs();

#[derive(Parser, Debug)]
#[command(name = "stock-mcpd", version, about = "Stock market data MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "TUSHARE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(long, env = "TUSHARE_API_URL", default_value = DEFAULT_API_URL)]
    api_url: Url,

    #[arg(long, env = "TUSHARE_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[arg(
        long = "http",
        env = "STOCK_MCP_HTTP",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    http_serve: bool,

    #[arg(long, env = "STOCK_MCP_HTTP_ADDR", default_value_t = DEFAULT_HTTP_ADDR)]
    http_addr: SocketAddr,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone, Debug)]
pub struct StockConfig {
    pub tushare: TushareConfig,
    pub http_serve: bool,
    pub http_addr: SocketAddr,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl StockConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    pub const fn has_token(&self) -> bool {
        self.tushare.token.is_some()
    }
}

impl TryFrom<CliArgs> for StockConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "TUSHARE_TIMEOUT_SECS",
                value: args.timeout_secs.to_string(),
            });
        }

        if !matches!(args.api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidSetting {
                name: "TUSHARE_API_URL",
                value: args.api_url.to_string(),
            });
        }

        let mut tushare = TushareConfig::new(args.api_url)
            .with_timeout(Duration::from_secs(args.timeout_secs));
        if let Some(token) = args
            .token
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
        {
            tushare = tushare.with_token(token);
        }

        Ok(Self {
            tushare,
            http_serve: args.http_serve,
            http_addr: args.http_addr,
        })
    }
}
