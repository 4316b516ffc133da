use careintel_core::Upstream;
use rmcp::{ErrorData, model::CallToolResult, tool, tool_router};

use crate::{CareIntelMcp, helpers};

#[tool_router(router = tool_router_digest, vis = "pub")]
impl<U: Upstream + 'static> CareIntelMcp<U> {
    #[tool(description = "Generate a comprehensive monthly intelligence digest covering publications, parliamentary activity, and upcoming changes. Perfect for regular review meetings.")]
    async fn generate_monthly_digest(&self) -> Result<CallToolResult, ErrorData> {
        match self.aggregator().monthly_digest().await {
            Ok(digest) => helpers::json_result(&digest),
            Err(err) => Ok(helpers::tool_failure("generate_monthly_digest", &err)),
        }
    }
}
