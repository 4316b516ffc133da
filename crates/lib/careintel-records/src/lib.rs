//! Canonical records and result models for careintel.
//!
//! This crate defines the normalized shapes shared by the aggregation
//! pipeline and the MCP surface, plus the fixed labels and limits they use.

pub mod models;
pub mod schema;

pub use models::*;
