use careintel_core::Upstream;
use careintel_records::QueryWindow;
use careintel_records::schema::{DEFAULT_QUESTION_TERM, DEFAULT_QUESTION_WINDOW_DAYS};
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::{CareIntelMcp, helpers};

/// Parameters for listing written parliamentary questions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct GetParliamentaryQuestionsParams {
    /// Search term to filter questions (default: "care").
    pub search_term: Option<String>,
    /// Number of days to search back (default: 90).
    pub days: Option<f64>,
}

impl GetParliamentaryQuestionsParams {
    fn term(&self) -> &str {
        self.search_term
            .as_deref()
            .filter(|term| !term.is_empty())
            .unwrap_or(DEFAULT_QUESTION_TERM)
    }
}

#[tool_router(router = tool_router_parliament, vis = "pub")]
impl<U: Upstream + 'static> CareIntelMcp<U> {
    #[tool(description = "Get written parliamentary questions and answers about the care sector from DHSC. Useful for tracking policy positions and ministerial responses.")]
    async fn get_parliamentary_questions(
        &self,
        Parameters(params): Parameters<GetParliamentaryQuestionsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let window = QueryWindow::or_default(params.days, DEFAULT_QUESTION_WINDOW_DAYS);
        match self
            .aggregator()
            .parliamentary_questions(params.term(), window)
            .await
        {
            Ok(results) => helpers::json_result(&results),
            Err(err) => Ok(helpers::tool_failure("get_parliamentary_questions", &err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use careintel_core::UpstreamKind;
    use serde_json::json;

    use super::*;
    use crate::testing::{FixedUpstream, empty_search, payload, server};

    #[test]
    fn empty_or_missing_term_falls_back_to_care() {
        let params: GetParliamentaryQuestionsParams =
            serde_json::from_str("{}").expect("empty params parse");
        assert_eq!(params.term(), "care");

        let params: GetParliamentaryQuestionsParams =
            serde_json::from_str(r#"{"searchTerm": ""}"#).expect("params parse");
        assert_eq!(params.term(), "care");

        let params: GetParliamentaryQuestionsParams =
            serde_json::from_str(r#"{"searchTerm": "workforce", "days": 30}"#)
                .expect("params parse");
        assert_eq!(params.term(), "workforce");
        assert_eq!(
            QueryWindow::or_default(params.days, DEFAULT_QUESTION_WINDOW_DAYS).days(),
            30
        );
    }

    #[tokio::test]
    async fn parliament_outage_is_an_error_result() {
        let server = server(
            FixedUpstream::ok(UpstreamKind::GovUk, empty_search()),
            FixedUpstream::failing(UpstreamKind::Parliament, 503),
        );

        let result = server
            .get_parliamentary_questions(Parameters(GetParliamentaryQuestionsParams::default()))
            .await
            .expect("failures are tool results, not protocol errors");

        assert_eq!(result.is_error, Some(true));
        let body = payload(&result);
        assert_eq!(body["tool"], "get_parliamentary_questions");
        assert_eq!(body["error"], "Parliament API error: 503 Service Unavailable");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn matching_questions_are_returned_as_json() {
        let questions = json!({
            "results": [
                { "value": { "id": 11, "questionText": "Social care workforce" } },
                { "value": { "id": 12, "questionText": "Bus routes" } }
            ]
        });
        let server = server(
            FixedUpstream::ok(UpstreamKind::GovUk, empty_search()),
            FixedUpstream::ok(UpstreamKind::Parliament, questions),
        );

        let result = server
            .get_parliamentary_questions(Parameters(GetParliamentaryQuestionsParams {
                search_term: Some("workforce".to_string()),
                days: Some(30.0),
            }))
            .await
            .expect("tool runs");

        assert_eq!(result.is_error, Some(false));
        let body = payload(&result);
        assert_eq!(body["totalFound"], 1);
        assert_eq!(body["searchTerm"], "workforce");
        assert_eq!(body["searchPeriod"], "Last 30 days");
        assert_eq!(body["results"][0]["questionId"], 11);
    }
}
