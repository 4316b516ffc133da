use careintel_records::schema::{PARLIAMENT_QUESTIONS_ENDPOINT, QUESTION_RESULT_CAP};
use careintel_records::{QueryWindow, QuestionResults, ResultSet};
use tracing::debug;

use super::Aggregator;
use crate::dedup::dedup_by_identity;
use crate::filter::filter_by_term;
use crate::normalize::{RawQuestionPage, normalize_question, parse_page};
use crate::query::question_params;
use crate::upstream::{Upstream, UpstreamError};

impl<U: Upstream> Aggregator<U> {
    /// Fetches recent DHSC written questions mentioning `term`.
    ///
    /// The archive cannot filter by date, so `window` only labels the result.
    ///
    /// # Errors
    /// Returns `UpstreamError` when the archive is unavailable and the
    /// question policy is `Propagate` (the default).
    pub async fn parliamentary_questions(
        &self,
        term: &str,
        window: QueryWindow,
    ) -> Result<QuestionResults, UpstreamError> {
        let outcome = self.fetch_questions(term, window).await;
        self.config.question_policy.settle(outcome, window, term)
    }

    async fn fetch_questions(
        &self,
        term: &str,
        window: QueryWindow,
    ) -> Result<QuestionResults, UpstreamError> {
        let body = self
            .parliament
            .fetch(PARLIAMENT_QUESTIONS_ENDPOINT, &question_params())
            .await?;
        let page: RawQuestionPage = parse_page(self.parliament.kind(), body)?;

        let questions = dedup_by_identity(
            page.results
                .unwrap_or_default()
                .into_iter()
                .filter_map(|item| item.value)
                .map(normalize_question),
        );
        let fetched = questions.len();
        let matched = filter_by_term(questions, term);
        debug!(term, fetched, matched = matched.len(), "question search complete");

        Ok(ResultSet::capped(
            matched.len(),
            window,
            term,
            matched,
            QUESTION_RESULT_CAP,
        ))
    }
}
