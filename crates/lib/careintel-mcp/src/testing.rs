use careintel_core::{Aggregator, AggregatorConfig, QueryParams, Upstream, UpstreamError, UpstreamKind};
use rmcp::model::CallToolResult;
use serde_json::{Value, json};

use crate::CareIntelMcp;

/// Upstream that answers every request with the same body, or the same status failure.
pub struct FixedUpstream {
    kind: UpstreamKind,
    outcome: Result<Value, u16>,
}

impl FixedUpstream {
    pub const fn ok(kind: UpstreamKind, body: Value) -> Self {
        Self {
            kind,
            outcome: Ok(body),
        }
    }

    pub const fn failing(kind: UpstreamKind, status: u16) -> Self {
        Self {
            kind,
            outcome: Err(status),
        }
    }
}

impl Upstream for FixedUpstream {
    fn kind(&self) -> UpstreamKind {
        self.kind
    }

    async fn fetch(&self, _endpoint: &str, _params: &QueryParams) -> Result<Value, UpstreamError> {
        self.outcome.clone().map_err(|status| UpstreamError::Status {
            kind: self.kind,
            status,
            status_text: "Service Unavailable".to_string(),
        })
    }
}

pub fn empty_search() -> Value {
    json!({ "total": 0, "results": [] })
}

pub fn server(govuk: FixedUpstream, parliament: FixedUpstream) -> CareIntelMcp<FixedUpstream> {
    CareIntelMcp::new(Aggregator::new(govuk, parliament, AggregatorConfig::default()))
}

/// Parses the single text block of a tool result as JSON.
pub fn payload(result: &CallToolResult) -> Value {
    let value = serde_json::to_value(result).expect("result serializes");
    let text = value["content"][0]["text"].as_str().expect("text content");
    serde_json::from_str(text).expect("content is json")
}
