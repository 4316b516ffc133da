//! Request parameters for each upstream.

use careintel_records::QueryWindow;
use careintel_records::schema::{ANSWERING_BODY_DHSC, PUBLICATION_PAGE_SIZE, QUESTION_PAGE_SIZE};
use chrono::NaiveDate;

use crate::upstream::QueryParams;

const NEWEST_FIRST: &str = "-public_timestamp";

/// GOV.UK document types the publication search can be narrowed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    #[default]
    All,
    Guidance,
    Regulation,
    Consultation,
    PolicyPaper,
}

impl ContentType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Guidance => "guidance",
            Self::Regulation => "regulation",
            Self::Consultation => "consultation",
            Self::PolicyPaper => "policy_paper",
        }
    }

    /// Upstream filter value, or `None` for the wildcard.
    #[must_use]
    pub const fn filter_value(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            other => Some(other.as_str()),
        }
    }
}

/// One free-text search against the GOV.UK index.
#[derive(Debug, Clone, Copy)]
pub struct PublicationQuery<'a> {
    pub term: &'a str,
    pub window: QueryWindow,
    pub content_type: ContentType,
}

impl PublicationQuery<'_> {
    #[must_use]
    pub fn params(&self, today: NaiveDate) -> QueryParams {
        let from = self
            .window
            .from_date(today)
            .map(|date| format!("from:{}", date.format("%Y-%m-%d")));

        QueryParams::new()
            .with("q", self.term)
            .with("count", PUBLICATION_PAGE_SIZE)
            .with("order", NEWEST_FIRST)
            .with_opt("filter_public_timestamp", from)
            .with_opt(
                "filter_content_store_document_type",
                self.content_type.filter_value(),
            )
    }
}

/// Page request for DHSC written questions. The archive has no text filter,
/// so matching happens after the fetch.
#[must_use]
pub fn question_params() -> QueryParams {
    QueryParams::new()
        .with("take", QUESTION_PAGE_SIZE)
        .with("answeringBodyId", ANSWERING_BODY_DHSC)
}
