//! MCP command implementation.

use std::path::Path;

use anyhow::Result;
use import_scout_mcp::ImportScoutMcp;
use import_scout_ops::{FileSource, OpsContext};
use tracing::info;

/// Load the project at `path` and serve it over stdio until the client hangs up.
pub async fn execute(ctx: &OpsContext, path: &Path) -> Result<()> {
    let source = FileSource::detect(path);
    let server = ImportScoutMcp::load(ctx, &source).await?;

    info!(files = server.file_count(), "Serving MCP over stdio");
    server.run_stdio().await
}
