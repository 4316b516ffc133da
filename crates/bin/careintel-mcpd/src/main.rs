//! Daemon entry point for the careintel MCP server.
//!
//! Loads configuration from the command line and environment, builds the
//! upstream clients, and serves the MCP protocol over stdio and/or streamable
//! HTTP. Logs go to stderr so stdout stays reserved for the protocol.

mod config;
mod sources;

use std::sync::Arc;

use careintel_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::CareIntelConfig;
use crate::sources::build_aggregator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = CareIntelConfig::from_args()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let aggregator = Arc::new(build_aggregator(&config)?);
    info!(
        govuk = %config.govuk_base_url,
        parliament = %config.parliament_base_url,
        degrade_questions = config.degrade_questions,
        "careintel aggregator ready"
    );

    let http_config = McpHttpServerConfig::new(config.mcp_http_addr);
    match (config.enable_stdio, config.mcp_serve) {
        (true, true) => {
            tokio::try_join!(
                serve_stdio(aggregator.clone()),
                serve_streamable_http(aggregator, http_config),
            )?;
        }
        (true, false) => serve_stdio(aggregator).await?,
        (false, true) => serve_streamable_http(aggregator, http_config).await?,
        (false, false) => {}
    }
    Ok(())
}
