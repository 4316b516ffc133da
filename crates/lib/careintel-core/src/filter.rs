//! Client-side relevance filters the upstream query languages cannot express.

use careintel_records::schema::CALENDAR_KEYWORDS;
use careintel_records::{PublicationRecord, QuestionRecord};

/// Keeps questions whose question or answer text contains `term`,
/// case-insensitively.
#[must_use]
pub fn filter_by_term(records: Vec<QuestionRecord>, term: &str) -> Vec<QuestionRecord> {
    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|record| record.match_text.contains(&needle))
        .collect()
}

/// True when the title or description mentions any calendar keyword.
#[must_use]
pub fn is_calendar_item(record: &PublicationRecord) -> bool {
    let title = record.title.to_lowercase();
    let description = record.description.to_lowercase();
    CALENDAR_KEYWORDS
        .iter()
        .any(|keyword| title.contains(keyword) || description.contains(keyword))
}

#[must_use]
pub fn filter_calendar(records: Vec<PublicationRecord>) -> Vec<PublicationRecord> {
    records.into_iter().filter(is_calendar_item).collect()
}
