//! Upstream clients and the aggregation pipeline for careintel.
//!
//! This crate queries the GOV.UK search index and the Parliament written
//! questions archive, normalizes their records, and composes deduplicated,
//! filtered result sets and digests.

pub mod aggregator;
pub mod dedup;
pub mod filter;
pub mod normalize;
pub mod query;
pub mod upstream;

pub use aggregator::{Aggregator, AggregatorConfig, FailurePolicy};
pub use query::ContentType;
pub use upstream::{HttpUpstream, QueryParams, Upstream, UpstreamError, UpstreamKind};
