pub const GOVUK_SEARCH_ENDPOINT: &str = "/api/search.json";
pub const PARLIAMENT_QUESTIONS_ENDPOINT: &str = "/api/writtenquestions/questions";

pub const DEFAULT_GOVUK_BASE_URL: &str = "https://www.gov.uk";
pub const DEFAULT_GOVUK_WEB_ROOT: &str = "https://www.gov.uk";
pub const DEFAULT_PARLIAMENT_BASE_URL: &str = "https://questions-statements-api.parliament.uk";

/// Department of Health and Social Care.
pub const ANSWERING_BODY_DHSC: u32 = 17;

pub const PUBLICATION_PAGE_SIZE: usize = 50;
pub const QUESTION_PAGE_SIZE: usize = 50;
pub const QUESTION_RESULT_CAP: usize = 25;
pub const CALENDAR_RESULT_CAP: usize = 15;
pub const DIGEST_SECTION_CAP: usize = 10;

/// Windows wider than this are sent without a published-date filter.
pub const MAX_FILTERED_WINDOW_DAYS: u32 = 365;

pub const DEFAULT_PUBLICATION_WINDOW_DAYS: u32 = 30;
pub const DEFAULT_QUESTION_WINDOW_DAYS: u32 = 90;
pub const DEFAULT_QUESTION_TERM: &str = "care";
pub const DEFAULT_CALENDAR_MONTHS: u32 = 6;

pub const CALENDAR_WINDOW_DAYS: u32 = 90;
pub const CALENDAR_TERMS: [&str; 2] = ["consultation", "regulation"];
pub const CALENDAR_KEYWORDS: [&str; 4] = [
    "consultation",
    "deadline",
    "coming into force",
    "consultation closes",
];
pub const CALENDAR_NOTE: &str = "This shows recent publications about upcoming changes and consultations. Specific deadline dates require manual review of each publication.";

pub const DIGEST_WINDOW_DAYS: u32 = 30;
pub const DIGEST_PUBLICATION_TERMS: [&str; 2] = ["care quality commission", "adult social care"];
pub const DIGEST_QUESTION_TERM: &str = "care";
pub const DIGEST_CALENDAR_MONTHS: u32 = 3;

pub const UNKNOWN: &str = "Unknown";
pub const UNTITLED: &str = "Untitled";
pub const NO_DESCRIPTION: &str = "No description available";
pub const NOT_YET_ANSWERED: &str = "Not yet answered";
pub const AWAITING_ANSWER: &str = "Awaiting answer";
pub const NOT_ASSIGNED: &str = "Not assigned";

/// Display format for calendar dates, e.g. `07 Mar 2025`.
pub const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";

#[must_use]
pub fn window_label(days: u32) -> String {
    format!("Last {days} days")
}
