use careintel_records::schema::{GOVUK_SEARCH_ENDPOINT, PUBLICATION_PAGE_SIZE};
use careintel_records::{PublicationResults, QueryWindow, ResultSet};
use tracing::debug;

use super::Aggregator;
use crate::dedup::dedup_by_identity;
use crate::normalize::{RawSearchPage, parse_page};
use crate::query::{ContentType, PublicationQuery};
use crate::upstream::{Upstream, UpstreamError};

impl<U: Upstream> Aggregator<U> {
    /// Searches GOV.UK publications within `window`.
    ///
    /// Under the default policy an upstream failure yields an empty set with
    /// `error` populated instead of an `Err`.
    ///
    /// # Errors
    /// Returns `UpstreamError` only when the publication policy is `Propagate`.
    pub async fn search_publications(
        &self,
        term: &str,
        window: QueryWindow,
        content_type: ContentType,
    ) -> Result<PublicationResults, UpstreamError> {
        let outcome = self.fetch_publications(term, window, content_type).await;
        self.config.publication_policy.settle(outcome, window, term)
    }

    async fn fetch_publications(
        &self,
        term: &str,
        window: QueryWindow,
        content_type: ContentType,
    ) -> Result<PublicationResults, UpstreamError> {
        let query = PublicationQuery {
            term,
            window,
            content_type,
        };
        let params = query.params(self.today());
        let body = self.govuk.fetch(GOVUK_SEARCH_ENDPOINT, &params).await?;
        let page: RawSearchPage = parse_page(self.govuk.kind(), body)?;

        let total = page
            .total
            .map_or(0, |total| usize::try_from(total).unwrap_or(usize::MAX));
        let records = dedup_by_identity(
            page.results
                .unwrap_or_default()
                .into_iter()
                .map(|raw| self.normalizer.normalize(raw)),
        );
        debug!(term, total, fetched = records.len(), "publication search complete");

        Ok(ResultSet::capped(
            total,
            window,
            term,
            records,
            PUBLICATION_PAGE_SIZE,
        ))
    }
}
