//! MCP tool modules.
//!
//! Tools are grouped by upstream: GOV.UK publications (search and calendar),
//! Parliament written questions, and the combined monthly digest.

pub mod digest;
pub mod parliament;
pub mod publications;

pub use parliament::GetParliamentaryQuestionsParams;
pub use publications::{ContentTypeParam, GetRegulatoryCalendarParams, SearchPublicationsParams};
