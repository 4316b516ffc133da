//! Orchestration of upstream queries into result sets and digests.
//!
//! Each operation lives in its own module as an `impl` block on
//! [`Aggregator`]. Every upstream failure is settled through the operation's
//! [`FailurePolicy`] before it reaches the caller.

mod calendar;
mod digest;
mod publications;
mod questions;


use careintel_records::schema::DEFAULT_GOVUK_WEB_ROOT;
use careintel_records::{QueryWindow, ResultSet};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;

use crate::normalize::PublicationNormalizer;
use crate::upstream::{Upstream, UpstreamError};

/// What an operation does when its upstream call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Return an empty result set annotated with the error.
    Degrade,
    /// Return the error to the caller.
    Propagate,
}

impl FailurePolicy {
    /// Applies the policy to the outcome of one upstream-backed operation.
    ///
    /// # Errors
    /// Returns the upstream error unchanged under `Propagate`.
    pub fn settle<T>(
        self,
        outcome: Result<ResultSet<T>, UpstreamError>,
        window: QueryWindow,
        term: &str,
    ) -> Result<ResultSet<T>, UpstreamError> {
        match (self, outcome) {
            (_, Ok(set)) => Ok(set),
            (Self::Degrade, Err(err)) => {
                warn!(source = err.kind().label(), term, error = %err, "upstream failed, returning empty result");
                Ok(ResultSet::failed(window, term, err.to_string()))
            }
            (Self::Propagate, Err(err)) => Err(err),
        }
    }
}

pub type Clock = fn() -> DateTime<Utc>;

/// Policies and settings for an [`Aggregator`].
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub govuk_web_root: String,
    pub publication_policy: FailurePolicy,
    pub question_policy: FailurePolicy,
    pub clock: Clock,
}

impl AggregatorConfig {
    #[must_use]
    pub fn new(govuk_web_root: impl Into<String>) -> Self {
        Self {
            govuk_web_root: govuk_web_root.into(),
            publication_policy: FailurePolicy::Degrade,
            question_policy: FailurePolicy::Propagate,
            clock: Utc::now,
        }
    }

    #[must_use]
    pub const fn with_question_policy(mut self, policy: FailurePolicy) -> Self {
        self.question_policy = policy;
        self
    }

    #[must_use]
    pub const fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GOVUK_WEB_ROOT)
    }
}

/// Runs the four intelligence operations against a pair of upstreams.
pub struct Aggregator<U: Upstream> {
    govuk: U,
    parliament: U,
    normalizer: PublicationNormalizer,
    config: AggregatorConfig,
}

impl<U: Upstream> Aggregator<U> {
    #[must_use]
    pub fn new(govuk: U, parliament: U, config: AggregatorConfig) -> Self {
        let normalizer = PublicationNormalizer::new(config.govuk_web_root.clone());
        Self {
            govuk,
            parliament,
            normalizer,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    fn now(&self) -> DateTime<Utc> {
        (self.config.clock)()
    }

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
