use clap::{Parser, ValueEnum, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;

use stockdata_core::provider::DEFAULT_BASE_URL;
use stockdata_core::{ProviderConfig, Url};

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4020";
const DEFAULT_LOG_FILTER: &str = "info";
const API_KEY_SETTING: &str = "PROVIDER_API_KEY";
const BASE_URL_SETTING: &str = "PROVIDER_BASE_URL";

/// Transport the MCP server listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    Stdio,
    Http,
}

#[derive(Parser, Debug)]
#[command(name = "stockdata-mcpd", version, about = "Stock data MCP daemon.")]
struct CliArgs {
    #[arg(long, env = BASE_URL_SETTING, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = API_KEY_SETTING, hide_env_values = true)]
    api_key: Option<String>,

    #[arg(
        long,
        env = "STOCKDATA_TRANSPORT",
        value_enum,
        default_value_t = Transport::Stdio
    )]
    transport: Transport,

    #[arg(long, env = "STOCKDATA_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(
        long,
        env = "STOCKDATA_MCP_STATELESS",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    mcp_stateless: bool,

    #[arg(long, env = "STOCKDATA_LOG", default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct StockDataConfig {
    pub provider: ProviderConfig,
    pub transport: Transport,
    pub mcp_http_addr: SocketAddr,
    pub mcp_stateful: bool,
    pub log_filter: String,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl StockDataConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for StockDataConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let api_key = args
            .api_key
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingSetting(API_KEY_SETTING))?;

        let base_url = parse_base_url(&args.base_url)?;

        let log_filter = if args.log_filter.trim().is_empty() {
            DEFAULT_LOG_FILTER.to_string()
        } else {
            args.log_filter
        };

        Ok(Self {
            provider: ProviderConfig::new(base_url, api_key),
            transport: args.transport,
            mcp_http_addr: args.mcp_http_addr,
            mcp_stateful: !args.mcp_stateless,
            log_filter,
        })
    }
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let invalid = || ConfigError::InvalidSetting {
        name: BASE_URL_SETTING,
        value: value.to_string(),
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }
    let url = Url::parse(trimmed).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    Ok(url)
}
