use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::schema::{MAX_FILTERED_WINDOW_DAYS, UNKNOWN, window_label};

/// A normalized record that can be deduplicated and listed in a result set.
pub trait Record {
    /// JSON key carrying the pre-cap total for result sets of this record.
    const TOTAL_KEY: &'static str;
    /// JSON key carrying the query or search term for result sets of this record.
    const TERM_KEY: &'static str;

    /// Key used to detect duplicates across queries, or `None` when the
    /// upstream record carried no identifier.
    fn identity_key(&self) -> Option<Cow<'_, str>>;
}

/// A GOV.UK publication normalized from the search index.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublicationRecord {
    pub title: String,
    pub description: String,
    pub link: String,
    pub published: String,
    pub organisations: String,
    pub document_type: String,
    /// False when the search index returned no link and `link` is a placeholder.
    #[serde(skip)]
    pub linked: bool,
}

impl Record for PublicationRecord {
    const TOTAL_KEY: &'static str = "totalResults";
    const TERM_KEY: &'static str = "query";

    fn identity_key(&self) -> Option<Cow<'_, str>> {
        self.linked.then_some(Cow::Borrowed(self.link.as_str()))
    }
}

/// Upstream question identifier; Parliament uses integers but the shape is opaque.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum QuestionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// Lower-cased question and answer text, derived once per record.
///
/// Absent text is stored as the empty string so it never matches a
/// non-empty term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchText {
    question: String,
    answer: String,
}

impl MatchText {
    #[must_use]
    pub fn new(question: Option<&str>, answer: Option<&str>) -> Self {
        Self {
            question: question.map(str::to_lowercase).unwrap_or_default(),
            answer: answer.map(str::to_lowercase).unwrap_or_default(),
        }
    }

    /// Substring match against either text. `needle` must already be lower-cased.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.question.contains(needle) || self.answer.contains(needle)
    }
}

/// A written parliamentary question normalized from the questions archive.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    #[serde(serialize_with = "id_or_unknown")]
    pub question_id: Option<QuestionId>,
    pub asked: String,
    pub answered: String,
    pub asked_by: String,
    pub question: String,
    pub answer: String,
    pub minister: String,
    #[serde(skip)]
    pub match_text: MatchText,
}

impl Record for QuestionRecord {
    const TOTAL_KEY: &'static str = "totalFound";
    const TERM_KEY: &'static str = "searchTerm";

    fn identity_key(&self) -> Option<Cow<'_, str>> {
        self.question_id.as_ref().map(|id| match id {
            QuestionId::Text(id) => Cow::Borrowed(id.as_str()),
            QuestionId::Number(id) => Cow::Owned(id.to_string()),
        })
    }
}

#[allow(clippy::ref_option)]
fn id_or_unknown<S: Serializer>(id: &Option<QuestionId>, serializer: S) -> Result<S::Ok, S::Error> {
    match id {
        Some(id) => id.serialize(serializer),
        None => serializer.serialize_str(UNKNOWN),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidWindow;

impl fmt::Display for InvalidWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("query window must be a positive number of days")
    }
}

impl Error for InvalidWindow {}

/// Rounds a caller-supplied count up to a whole number, saturating at
/// `u32::MAX`. Returns `None` for zero, negative, or non-finite input.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn positive_whole(value: f64) -> Option<u32> {
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    let whole = value.ceil();
    if whole >= f64::from(u32::MAX) {
        Some(u32::MAX)
    } else {
        Some(whole as u32)
    }
}

/// Lookback period, in days, used to scope a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    days: u32,
}

impl QueryWindow {
    /// Validates a caller-supplied day count. Fractional counts round up.
    ///
    /// # Errors
    /// Returns `InvalidWindow` when `days` is zero, negative, or not finite.
    pub fn new(days: f64) -> Result<Self, InvalidWindow> {
        positive_whole(days)
            .map(|days| Self { days })
            .ok_or(InvalidWindow)
    }

    /// Window for a known-positive constant; zero is clamped to one day.
    #[must_use]
    pub const fn fixed(days: u32) -> Self {
        Self {
            days: if days == 0 { 1 } else { days },
        }
    }

    /// Resolves a caller-supplied window, treating absent or invalid values
    /// as `default`.
    #[must_use]
    pub fn or_default(days: Option<f64>, default: u32) -> Self {
        days.and_then(|days| Self::new(days).ok())
            .unwrap_or_else(|| Self::fixed(default))
    }

    #[must_use]
    pub const fn days(self) -> u32 {
        self.days
    }

    #[must_use]
    pub fn label(self) -> String {
        window_label(self.days)
    }

    /// Absolute start date for an upstream filter, or `None` when the window
    /// is too wide to be sent as a filter.
    #[must_use]
    pub fn from_date(self, today: NaiveDate) -> Option<NaiveDate> {
        if self.days > MAX_FILTERED_WINDOW_DAYS {
            return None;
        }
        today.checked_sub_days(Days::new(u64::from(self.days)))
    }
}

/// Capped, ordered records from one operation along with the pre-cap total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet<T> {
    pub total_available: usize,
    pub window: QueryWindow,
    pub term: String,
    pub records: Vec<T>,
    pub error: Option<String>,
}

impl<T> ResultSet<T> {
    #[must_use]
    pub fn capped(
        total_available: usize,
        window: QueryWindow,
        term: impl Into<String>,
        mut records: Vec<T>,
        cap: usize,
    ) -> Self {
        records.truncate(cap);
        Self {
            total_available,
            window,
            term: term.into(),
            records,
            error: None,
        }
    }

    /// Empty set annotated with the failure that produced it.
    #[must_use]
    pub fn failed(window: QueryWindow, term: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            total_available: 0,
            window,
            term: term.into(),
            records: Vec::new(),
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub const fn records_shown(&self) -> usize {
        self.records.len()
    }
}

impl<T: Record + Serialize> Serialize for ResultSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.error.is_some() { 6 } else { 5 };
        let mut state = serializer.serialize_struct("ResultSet", len)?;
        state.serialize_field(T::TOTAL_KEY, &self.total_available)?;
        state.serialize_field("resultsShown", &self.records_shown())?;
        state.serialize_field("searchPeriod", &self.window.label())?;
        state.serialize_field(T::TERM_KEY, &self.term)?;
        state.serialize_field("results", &self.records)?;
        if let Some(error) = &self.error {
            state.serialize_field("error", error)?;
        }
        state.end()
    }
}

pub type PublicationResults = ResultSet<PublicationRecord>;
pub type QuestionResults = ResultSet<QuestionRecord>;

/// Recent publications that look like upcoming changes or open consultations.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegulatoryCalendar {
    pub note: String,
    pub search_period: String,
    pub upcoming_items: Vec<PublicationRecord>,
}

/// One named section of a digest.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DigestSection<T> {
    pub total: usize,
    pub items: Vec<T>,
}

impl<T> DigestSection<T> {
    #[must_use]
    pub fn capped(total: usize, mut items: Vec<T>, cap: usize) -> Self {
        items.truncate(cap);
        Self { total, items }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DigestSections {
    pub publications: DigestSection<PublicationRecord>,
    pub parliamentary_activity: DigestSection<QuestionRecord>,
    pub upcoming_changes: DigestSection<PublicationRecord>,
}

/// Periodic review digest combining publications, questions, and upcoming changes.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Digest {
    pub generated_at: DateTime<Utc>,
    pub generated_date: String,
    pub period: String,
    pub sections: DigestSections,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publication(link: &str) -> PublicationRecord {
        PublicationRecord {
            title: "Title".to_string(),
            description: "Description".to_string(),
            link: link.to_string(),
            published: "01 May 2025".to_string(),
            organisations: "Care Quality Commission".to_string(),
            document_type: "guidance".to_string(),
            linked: true,
        }
    }

    #[test]
    fn window_drops_filter_beyond_a_year() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 31).expect("valid date");
        let month = QueryWindow::new(30.0).expect("positive window");
        let year = QueryWindow::new(365.0).expect("positive window");
        let wide = QueryWindow::new(366.0).expect("positive window");

        assert_eq!(month.from_date(today), NaiveDate::from_ymd_opt(2025, 5, 1));
        assert_eq!(year.from_date(today), NaiveDate::from_ymd_opt(2024, 5, 31));
        assert_eq!(wide.from_date(today), None);
    }

    #[test]
    fn window_rejects_zero_and_defaults_missing() {
        assert_eq!(QueryWindow::new(0.0), Err(InvalidWindow));
        assert_eq!(QueryWindow::or_default(None, 30).days(), 30);
        assert_eq!(QueryWindow::or_default(Some(0.0), 90).days(), 90);
        assert_eq!(QueryWindow::or_default(Some(7.0), 90).label(), "Last 7 days");
    }

    #[test]
    fn window_accepts_any_json_number() {
        assert_eq!(QueryWindow::or_default(Some(30.0), 90).days(), 30);
        assert_eq!(QueryWindow::or_default(Some(2.5), 90).days(), 3);
        assert_eq!(QueryWindow::or_default(Some(-5.0), 30).days(), 30);
        assert_eq!(QueryWindow::or_default(Some(f64::NAN), 30).days(), 30);
        assert_eq!(QueryWindow::or_default(Some(1e12), 30).days(), u32::MAX);
        assert_eq!(QueryWindow::new(-1.0), Err(InvalidWindow));
    }

    #[test]
    fn capped_set_keeps_pre_cap_total() {
        let window = QueryWindow::new(30.0).expect("positive window");
        let records = (0..40)
            .map(|index| publication(&format!("https://www.gov.uk/{index}")))
            .collect::<Vec<_>>();
        let set = ResultSet::capped(40, window, "care", records, 10);

        assert_eq!(set.records_shown(), 10);
        assert_eq!(set.total_available, 40);
    }

    #[test]
    fn publication_set_serializes_with_publication_keys() {
        let window = QueryWindow::new(30.0).expect("positive window");
        let set = ResultSet::capped(3, window, "CQC guidance", vec![publication("/a")], 50);
        let value = serde_json::to_value(&set).expect("serializable");

        assert_eq!(value["totalResults"], 3);
        assert_eq!(value["resultsShown"], 1);
        assert_eq!(value["searchPeriod"], "Last 30 days");
        assert_eq!(value["query"], "CQC guidance");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn failed_question_set_serializes_error() {
        let window = QueryWindow::new(90.0).expect("positive window");
        let set: QuestionResults = ResultSet::failed(window, "care", "Parliament API error: 503");
        let value = serde_json::to_value(&set).expect("serializable");

        assert_eq!(value["totalFound"], 0);
        assert_eq!(value["resultsShown"], 0);
        assert_eq!(value["searchTerm"], "care");
        assert_eq!(value["error"], "Parliament API error: 503");
    }

    #[test]
    fn question_identity_key_renders_numbers() {
        let record = QuestionRecord {
            question_id: Some(QuestionId::Number(1_234)),
            asked: "01 May 2025".to_string(),
            answered: "Not yet answered".to_string(),
            asked_by: "Unknown".to_string(),
            question: "What funding exists for care homes?".to_string(),
            answer: "Awaiting answer".to_string(),
            minister: "Not assigned".to_string(),
            match_text: MatchText::new(Some("What funding exists for care homes?"), None),
        };

        assert_eq!(record.identity_key().as_deref(), Some("1234"));
        let value = serde_json::to_value(&record).expect("serializable");
        assert_eq!(value["questionId"], 1_234);
        assert!(value.get("matchText").is_none());
    }

    #[test]
    fn records_without_upstream_identifiers_have_no_identity() {
        let mut unlinked = publication("https://www.gov.uk");
        unlinked.linked = false;
        assert!(unlinked.identity_key().is_none());
        let value = serde_json::to_value(&unlinked).expect("serializable");
        assert_eq!(value["link"], "https://www.gov.uk");
        assert!(value.get("linked").is_none());

        let question = QuestionRecord {
            question_id: None,
            asked: "Unknown".to_string(),
            answered: "Not yet answered".to_string(),
            asked_by: "Unknown".to_string(),
            question: "Care home staffing".to_string(),
            answer: "Awaiting answer".to_string(),
            minister: "Not assigned".to_string(),
            match_text: MatchText::new(Some("Care home staffing"), None),
        };
        assert!(question.identity_key().is_none());
        let value = serde_json::to_value(&question).expect("serializable");
        assert_eq!(value["questionId"], "Unknown");
    }

    #[test]
    fn absent_answer_text_never_matches() {
        let text = MatchText::new(Some("Staffing levels"), None);
        assert!(text.contains("staffing"));
        assert!(!text.contains("awaiting"));
    }
}
