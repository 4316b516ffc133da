//! Raw upstream payload shapes and their mapping onto canonical records.
//!
//! Every upstream field is optional here. Defaults are resolved once, in this
//! module, so nothing downstream ever sees an absent field.

use careintel_records::schema::{
    AWAITING_ANSWER,
    DISPLAY_DATE_FORMAT,
    NO_DESCRIPTION,
    NOT_ASSIGNED,
    NOT_YET_ANSWERED,
    UNKNOWN,
    UNTITLED,
};
use careintel_records::{MatchText, PublicationRecord, QuestionId, QuestionRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::upstream::{UpstreamError, UpstreamKind};

#[derive(Debug, Default, Deserialize)]
pub struct RawSearchPage {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub results: Option<Vec<RawPublication>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawPublication {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub public_timestamp: Option<String>,
    #[serde(default)]
    pub organisations: Option<Vec<RawOrganisation>>,
    #[serde(default)]
    pub content_store_document_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawOrganisation {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawQuestionPage {
    #[serde(default)]
    pub results: Option<Vec<RawQuestionItem>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawQuestionItem {
    #[serde(default)]
    pub value: Option<RawQuestion>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    #[serde(default)]
    pub id: Option<QuestionId>,
    #[serde(default)]
    pub date_tabled: Option<String>,
    #[serde(default)]
    pub date_answered: Option<String>,
    #[serde(default)]
    pub asking_member_printed: Option<String>,
    #[serde(default)]
    pub question_text: Option<String>,
    #[serde(default)]
    pub answer_text: Option<String>,
    #[serde(default)]
    pub answering_member_printed: Option<String>,
}

/// Decodes an upstream body into a raw page shape.
///
/// # Errors
/// Returns `UpstreamError::Payload` when the body does not have the page's
/// overall shape.
pub fn parse_page<T: DeserializeOwned>(kind: UpstreamKind, body: Value) -> Result<T, UpstreamError> {
    serde_json::from_value(body).map_err(|err| UpstreamError::Payload {
        kind,
        message: err.to_string(),
    })
}

/// Maps GOV.UK search results onto publication records.
#[derive(Debug, Clone)]
pub struct PublicationNormalizer {
    web_root: String,
}

impl PublicationNormalizer {
    #[must_use]
    pub fn new(web_root: impl Into<String>) -> Self {
        Self {
            web_root: web_root.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn normalize(&self, raw: RawPublication) -> PublicationRecord {
        let organisations = raw
            .organisations
            .unwrap_or_default()
            .into_iter()
            .filter_map(|org| org.title)
            .collect::<Vec<_>>();
        let link = raw.link.filter(|link| !link.trim().is_empty());

        PublicationRecord {
            title: text_or(raw.title, UNTITLED),
            description: text_or(raw.description, NO_DESCRIPTION),
            linked: link.is_some(),
            link: self.absolute_link(link.as_deref().unwrap_or_default()),
            published: date_or(raw.public_timestamp.as_deref(), UNKNOWN),
            organisations: if organisations.is_empty() {
                UNKNOWN.to_string()
            } else {
                organisations.join(", ")
            },
            document_type: text_or(raw.content_store_document_type, UNKNOWN),
        }
    }

    fn absolute_link(&self, link: &str) -> String {
        if link.starts_with("https://") || link.starts_with("http://") {
            return link.to_string();
        }
        if link.starts_with('/') || link.is_empty() {
            format!("{}{link}", self.web_root)
        } else {
            format!("{}/{link}", self.web_root)
        }
    }
}

#[must_use]
pub fn normalize_question(raw: RawQuestion) -> QuestionRecord {
    let match_text = MatchText::new(raw.question_text.as_deref(), raw.answer_text.as_deref());

    QuestionRecord {
        question_id: raw.id,
        asked: date_or(raw.date_tabled.as_deref(), UNKNOWN),
        answered: date_or(raw.date_answered.as_deref(), NOT_YET_ANSWERED),
        asked_by: text_or(raw.asking_member_printed, UNKNOWN),
        question: raw.question_text.unwrap_or_default(),
        answer: text_or(raw.answer_text, AWAITING_ANSWER),
        minister: text_or(raw.answering_member_printed, NOT_ASSIGNED),
        match_text,
    }
}

/// Renders an upstream timestamp as `DD Mon YYYY`.
///
/// Offset timestamps keep the calendar date of their own offset. Values that
/// cannot be parsed are passed through unchanged.
#[must_use]
pub fn display_date(raw: &str) -> String {
    parse_date(raw).map_or_else(
        || raw.to_string(),
        |date| date.format(DISPLAY_DATE_FORMAT).to_string(),
    )
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.date_naive())
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|timestamp| timestamp.date())
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

fn date_or(raw: Option<&str>, fallback: &str) -> String {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => display_date(value),
        None => fallback.to_string(),
    }
}

fn text_or(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
