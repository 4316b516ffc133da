use careintel_core::upstream::build_http_client;
use careintel_core::{
    Aggregator,
    AggregatorConfig,
    FailurePolicy,
    HttpUpstream,
    UpstreamKind,
};

use crate::config::CareIntelConfig;

/// Builds the GOV.UK and Parliament upstreams and the aggregator over them.
///
/// # Errors
/// Returns an error if the shared HTTP client cannot be constructed.
pub fn build_aggregator(
    config: &CareIntelConfig,
) -> Result<Aggregator<HttpUpstream>, reqwest::Error> {
    let client = build_http_client(&config.user_agent)?;
    let govuk = HttpUpstream::new(UpstreamKind::GovUk, &config.govuk_base_url, client.clone())
        .with_timeout(config.upstream_timeout);
    let parliament = HttpUpstream::new(UpstreamKind::Parliament, &config.parliament_base_url, client)
        .with_timeout(config.upstream_timeout);

    let question_policy = if config.degrade_questions {
        FailurePolicy::Degrade
    } else {
        FailurePolicy::Propagate
    };
    let aggregator_config =
        AggregatorConfig::new(&config.govuk_web_root).with_question_policy(question_policy);

    Ok(Aggregator::new(govuk, parliament, aggregator_config))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn config(degrade_questions: bool) -> CareIntelConfig {
        CareIntelConfig {
            govuk_base_url: "http://127.0.0.1:9".to_string(),
            govuk_web_root: "https://www.gov.uk".to_string(),
            parliament_base_url: "http://127.0.0.1:9".to_string(),
            upstream_timeout: Duration::from_secs(5),
            user_agent: "careintel-tests".to_string(),
            degrade_questions,
            enable_stdio: true,
            mcp_serve: false,
            mcp_http_addr: "127.0.0.1:4020".parse().expect("addr"),
            log_filter: "info".to_string(),
        }
    }

    #[test]
    fn questions_propagate_by_default() {
        let aggregator = build_aggregator(&config(false)).expect("aggregator");
        assert_eq!(aggregator.config().question_policy, FailurePolicy::Propagate);
        assert_eq!(aggregator.config().publication_policy, FailurePolicy::Degrade);
    }

    #[test]
    fn question_degradation_is_opt_in() {
        let aggregator = build_aggregator(&config(true)).expect("aggregator");
        assert_eq!(aggregator.config().question_policy, FailurePolicy::Degrade);
    }
}
