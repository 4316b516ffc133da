use clap::{Parser, builder::BoolishValueParser};
use careintel_records::schema::{
    DEFAULT_GOVUK_BASE_URL,
    DEFAULT_GOVUK_WEB_ROOT,
    DEFAULT_PARLIAMENT_BASE_URL,
};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4020";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = concat!("careintel-mcpd/", env!("CARGO_PKG_VERSION"));
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(
    name = "careintel-mcpd",
    version,
    about = "UK care regulatory intelligence MCP daemon."
)]
struct CliArgs {
    #[arg(long, env = "CAREINTEL_GOVUK_BASE_URL", default_value = DEFAULT_GOVUK_BASE_URL)]
    govuk_base_url: String,

    #[arg(long, env = "CAREINTEL_GOVUK_WEB_ROOT", default_value = DEFAULT_GOVUK_WEB_ROOT)]
    govuk_web_root: String,

    #[arg(
        long,
        env = "CAREINTEL_PARLIAMENT_BASE_URL",
        default_value = DEFAULT_PARLIAMENT_BASE_URL
    )]
    parliament_base_url: String,

    #[arg(
        long,
        env = "CAREINTEL_UPSTREAM_TIMEOUT_SECS",
        default_value_t = DEFAULT_UPSTREAM_TIMEOUT_SECS
    )]
    upstream_timeout_secs: u64,

    #[arg(long, env = "CAREINTEL_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    #[arg(
        long,
        env = "CAREINTEL_DEGRADE_QUESTIONS",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    degrade_questions: bool,

    #[arg(
        long = "stdio",
        env = "CAREINTEL_ENABLE_STDIO",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "CAREINTEL_MCP_SERVE",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    mcp_serve: bool,

    #[arg(long, env = "CAREINTEL_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(long, env = "CAREINTEL_LOG", default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct CareIntelConfig {
    pub govuk_base_url: String,
    pub govuk_web_root: String,
    pub parliament_base_url: String,
    pub upstream_timeout: Duration,
    pub user_agent: String,
    pub degrade_questions: bool,
    pub enable_stdio: bool,
    pub mcp_serve: bool,
    pub mcp_http_addr: SocketAddr,
    pub log_filter: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSetting { name: &'static str, value: String },
    NoTransport,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
            Self::NoTransport => write!(
                f,
                "no transport enabled: set CAREINTEL_ENABLE_STDIO or CAREINTEL_MCP_SERVE"
            ),
        }
    }
}

impl Error for ConfigError {}

impl CareIntelConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for CareIntelConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let govuk_base_url = http_url("CAREINTEL_GOVUK_BASE_URL", args.govuk_base_url)?;
        let govuk_web_root = http_url("CAREINTEL_GOVUK_WEB_ROOT", args.govuk_web_root)?;
        let parliament_base_url =
            http_url("CAREINTEL_PARLIAMENT_BASE_URL", args.parliament_base_url)?;

        if args.upstream_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "CAREINTEL_UPSTREAM_TIMEOUT_SECS",
                value: args.upstream_timeout_secs.to_string(),
            });
        }

        if args.user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "CAREINTEL_USER_AGENT",
                value: args.user_agent,
            });
        }

        if !args.enable_stdio && !args.mcp_serve {
            return Err(ConfigError::NoTransport);
        }

        Ok(Self {
            govuk_base_url,
            govuk_web_root,
            parliament_base_url,
            upstream_timeout: Duration::from_secs(args.upstream_timeout_secs),
            user_agent: args.user_agent,
            degrade_questions: args.degrade_questions,
            enable_stdio: args.enable_stdio,
            mcp_serve: args.mcp_serve,
            mcp_http_addr: args.mcp_http_addr,
            log_filter: args.log_filter,
        })
    }
}

fn http_url(name: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        Ok(trimmed.trim_end_matches('/').to_string())
    } else {
        Err(ConfigError::InvalidSetting { name, value })
    }
}
