use careintel_records::schema::{
    DIGEST_CALENDAR_MONTHS,
    DIGEST_PUBLICATION_TERMS,
    DIGEST_QUESTION_TERM,
    DIGEST_SECTION_CAP,
    DIGEST_WINDOW_DAYS,
    DISPLAY_DATE_FORMAT,
};
use careintel_records::{Digest, DigestSection, DigestSections, QueryWindow};
use tracing::info;

use super::Aggregator;
use crate::dedup::dedup_by_identity;
use crate::query::ContentType;
use crate::upstream::{Upstream, UpstreamError};

impl<U: Upstream> Aggregator<U> {
    /// Builds the monthly review digest.
    ///
    /// Sub-queries run concurrently. Each section follows the failure policy
    /// of the operation it delegates to, so with default policies a
    /// Parliament outage fails the digest while publication outages only
    /// empty their sections.
    ///
    /// # Errors
    /// Returns the first propagated `UpstreamError` from any section.
    pub async fn monthly_digest(&self) -> Result<Digest, UpstreamError> {
        let window = QueryWindow::fixed(DIGEST_WINDOW_DAYS);
        let [regulator, sector] = DIGEST_PUBLICATION_TERMS;

        let (regulator, sector, questions, calendar) = tokio::join!(
            self.search_publications(regulator, window, ContentType::All),
            self.search_publications(sector, window, ContentType::All),
            self.parliamentary_questions(DIGEST_QUESTION_TERM, window),
            self.regulatory_calendar(DIGEST_CALENDAR_MONTHS),
        );

        let publications = dedup_by_identity(regulator?.records.into_iter().chain(sector?.records));
        let questions = questions?;
        let calendar = calendar?;

        let sections = DigestSections {
            publications: DigestSection::capped(
                publications.len(),
                publications,
                DIGEST_SECTION_CAP,
            ),
            parliamentary_activity: DigestSection::capped(
                questions.total_available,
                questions.records,
                DIGEST_SECTION_CAP,
            ),
            upcoming_changes: DigestSection::capped(
                calendar.upcoming_items.len(),
                calendar.upcoming_items,
                DIGEST_SECTION_CAP,
            ),
        };

        let generated_at = self.now();
        info!(
            publications = sections.publications.total,
            questions = sections.parliamentary_activity.total,
            upcoming = sections.upcoming_changes.total,
            "monthly digest generated"
        );

        Ok(Digest {
            generated_at,
            generated_date: generated_at.format(DISPLAY_DATE_FORMAT).to_string(),
            period: window.label(),
            sections,
        })
    }
}
