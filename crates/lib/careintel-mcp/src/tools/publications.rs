use careintel_core::{ContentType, Upstream};
use careintel_records::{QueryWindow, positive_whole};
use careintel_records::schema::{DEFAULT_CALENDAR_MONTHS, DEFAULT_PUBLICATION_WINDOW_DAYS};
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

/// GOV.UK document type filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContentTypeParam {
    #[default]
    All,
    Guidance,
    Regulation,
    Consultation,
    PolicyPaper,
}

impl From<ContentTypeParam> for ContentType {
    fn from(param: ContentTypeParam) -> Self {
        match param {
            ContentTypeParam::All => Self::All,
            ContentTypeParam::Guidance => Self::Guidance,
            ContentTypeParam::Regulation => Self::Regulation,
            ContentTypeParam::Consultation => Self::Consultation,
            ContentTypeParam::PolicyPaper => Self::PolicyPaper,
        }
    }
}

/// Parameters for searching GOV.UK publications.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchPublicationsParams {
    /// Search terms (e.g. "CQC guidance", "care quality", "adult social care").
    pub query: String,
    /// Number of days to search back (default: 30).
    pub days: Option<f64>,
    /// Filter by content type (default: "all").
    pub content_type: Option<ContentTypeParam>,
}

/// Parameters for the regulatory calendar.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct GetRegulatoryCalendarParams {
    /// Months ahead to look for upcoming changes (default: 6).
    pub months: Option<f64>,
}

#[tool_router(router = tool_router_publications, vis = "pub")]
impl<U: Upstream + 'static> CareIntelMcp<U> {
    #[tool(description = "Search Gov.uk for regulatory publications, guidance, and policy documents from DHSC and CQC. Returns publications from the specified time period.")]
    async fn search_publications(
        &self,
        Parameters(params): Parameters<SearchPublicationsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let window = QueryWindow::or_default(params.days, DEFAULT_PUBLICATION_WINDOW_DAYS);
        let content_type = params.content_type.unwrap_or_default().into();
        match self
            .aggregator()
            .search_publications(&params.query, window, content_type)
            .await
        {
            Ok(results) => helpers::json_result(&results),
            Err(err) => Ok(helpers::tool_failure("search_publications", &err)),
        }
    }

    #[tool(description = "Find upcoming regulatory changes, consultations, and compliance deadlines. Shows recent publications about future changes.")]
    async fn get_regulatory_calendar(
        &self,
        Parameters(params): Parameters<GetRegulatoryCalendarParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let months = params
            .months
            .and_then(positive_whole)
            .unwrap_or(DEFAULT_CALENDAR_MONTHS);
        match self.aggregator().regulatory_calendar(months).await {
            Ok(calendar) => helpers::json_result(&calendar),
            Err(err) => Ok(helpers::tool_failure("get_regulatory_calendar", &err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_params_accept_floats_and_negatives() {
        let params: SearchPublicationsParams =
            serde_json::from_str(r#"{"query": "care", "days": 30.0}"#).expect("params parse");
        assert_eq!(
            QueryWindow::or_default(params.days, DEFAULT_PUBLICATION_WINDOW_DAYS).days(),
            30
        );

        let params: SearchPublicationsParams =
            serde_json::from_str(r#"{"query": "care", "days": -5, "contentType": "policy_paper"}"#)
                .expect("params parse");
        assert_eq!(
            QueryWindow::or_default(params.days, DEFAULT_PUBLICATION_WINDOW_DAYS).days(),
            30
        );
        assert_eq!(params.content_type, Some(ContentTypeParam::PolicyPaper));

        let params: GetRegulatoryCalendarParams =
            serde_json::from_str(r#"{"months": 2.5}"#).expect("params parse");
        assert_eq!(params.months.and_then(positive_whole), Some(3));
    }
}
