use careintel_records::schema::{
    CALENDAR_NOTE,
    CALENDAR_RESULT_CAP,
    CALENDAR_TERMS,
    CALENDAR_WINDOW_DAYS,
};
use careintel_records::{QueryWindow, RegulatoryCalendar};
use tracing::debug;

use super::Aggregator;
use crate::dedup::dedup_by_identity;
use crate::filter::filter_calendar;
use crate::query::ContentType;
use crate::upstream::{Upstream, UpstreamError};

impl<U: Upstream> Aggregator<U> {
    /// Lists recent publications that look like consultations or upcoming
    /// changes. The search window is fixed; `months` is accepted for
    /// interface compatibility only.
    ///
    /// # Errors
    /// Returns `UpstreamError` only when the publication policy is `Propagate`.
    pub async fn regulatory_calendar(
        &self,
        months: u32,
    ) -> Result<RegulatoryCalendar, UpstreamError> {
        let window = QueryWindow::fixed(CALENDAR_WINDOW_DAYS);
        let [consultations, regulations] = CALENDAR_TERMS;
        debug!(months, days = window.days(), "building regulatory calendar");

        let (consultations, regulations) = tokio::join!(
            self.search_publications(consultations, window, ContentType::All),
            self.search_publications(regulations, window, ContentType::All),
        );

        // Consultation results always precede regulation results.
        let combined = consultations?
            .records
            .into_iter()
            .chain(regulations?.records);
        let mut upcoming_items = filter_calendar(dedup_by_identity(combined));
        upcoming_items.truncate(CALENDAR_RESULT_CAP);

        Ok(RegulatoryCalendar {
            note: CALENDAR_NOTE.to_string(),
            search_period: window.label(),
            upcoming_items,
        })
    }
}
