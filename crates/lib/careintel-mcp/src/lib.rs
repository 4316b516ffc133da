//! MCP server implementation for careintel.
//!
//! This crate wires the aggregation pipeline into rmcp tool handlers and
//! exposes the four regulatory-intelligence tools.

mod helpers;
mod tools;
pub mod server;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use careintel_core::{Aggregator, Upstream};
use rmcp::{ServerHandler, handler::server::tool::ToolRouter, tool_handler};
use rmcp::model::{ServerCapabilities, ServerInfo};

pub use tools::{
    ContentTypeParam,
    GetParliamentaryQuestionsParams,
    GetRegulatoryCalendarParams,
    SearchPublicationsParams,
};

const SERVER_INSTRUCTIONS: &str = r"uk-care-regulatory-intelligence tracks regulatory activity affecting adult social care in England.

Tools:
- `search_publications` searches GOV.UK for DHSC and CQC publications. `days` defaults to 30,
  `contentType` is one of all, guidance, regulation, consultation, policy_paper.
  Upstream failures are reported in an `error` field rather than failing the call.
- `get_parliamentary_questions` lists recent DHSC written questions whose question or answer
  mentions `searchTerm` (default `care`).
- `get_regulatory_calendar` lists recent consultations and publications about upcoming changes.
  Deadline dates are not extracted; review each publication.
- `generate_monthly_digest` combines publications, parliamentary activity, and upcoming changes
  for the last 30 days.

All results are JSON. Failed calls return `{error, tool, timestamp}` with the error flag set.";

/// MCP server wrapper around a shared aggregator and its tool routers.
pub struct CareIntelMcp<U: Upstream + 'static> {
    tool_router: ToolRouter<Self>,
    aggregator: Arc<Aggregator<U>>,
}

impl<U: Upstream + 'static> Clone for CareIntelMcp<U> {
    fn clone(&self) -> Self {
        Self {
            tool_router: self.tool_router.clone(),
            aggregator: self.aggregator.clone(),
        }
    }
}

impl<U: Upstream + 'static> CareIntelMcp<U> {
    /// Creates a new server that owns its aggregator.
    #[must_use]
    pub fn new(aggregator: Aggregator<U>) -> Self {
        Self::with_aggregator(Arc::new(aggregator))
    }

    /// Creates a new server using a shared aggregator handle.
    #[must_use]
    pub fn with_aggregator(aggregator: Arc<Aggregator<U>>) -> Self {
        let tool_router = Self::tool_router_publications()
            + Self::tool_router_parliament()
            + Self::tool_router_digest();
        Self {
            tool_router,
            aggregator,
        }
    }

    /// Names of the registered tools, in no particular order.
    #[must_use]
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect()
    }

    pub(crate) fn aggregator(&self) -> &Aggregator<U> {
        &self.aggregator
    }
}

#[tool_handler]
impl<U: Upstream + 'static> ServerHandler for CareIntelMcp<U> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use careintel_core::{AggregatorConfig, HttpUpstream, UpstreamKind};

    use super::*;

    fn server() -> CareIntelMcp<HttpUpstream> {
        let client = careintel_core::upstream::build_http_client("careintel-tests")
            .expect("http client");
        let govuk = HttpUpstream::new(UpstreamKind::GovUk, "http://127.0.0.1:9", client.clone());
        let parliament = HttpUpstream::new(UpstreamKind::Parliament, "http://127.0.0.1:9", client);
        CareIntelMcp::new(Aggregator::new(govuk, parliament, AggregatorConfig::default()))
    }

    #[test]
    fn registers_the_four_tools() {
        let mut names = server().tool_names();
        names.sort();
        assert_eq!(
            names,
            [
                "generate_monthly_digest",
                "get_parliamentary_questions",
                "get_regulatory_calendar",
                "search_publications",
            ]
        );
    }

    #[test]
    fn advertises_tools_capability() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.is_some_and(|text| text.contains("search_publications")));
    }
}
