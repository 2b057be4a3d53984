//! Graph command implementation.
//!
//! Renders the import graph reachable from an entry file as Graphviz DOT
//! or JSON.

use std::path::{Path, PathBuf};

use anyhow::Result;
use import_scout_ops::{GraphRequest, OpsContext};
use tracing::info;

use crate::GraphFormat;

/// Build the graph and write it to stdout or `output`.
pub async fn execute(
    ctx: &OpsContext,
    path: &Path,
    start: &str,
    max_depth: Option<usize>,
    format: GraphFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut request = GraphRequest::new(path, start);
    if let Some(depth) = max_depth {
        request = request.with_max_depth(depth);
    }

    let response = ctx.graph(request).await?;
    info!(
        nodes = response.node_count(),
        edges = response.edge_count(),
        unresolved = response.unresolved_count(),
        "Graph ready"
    );

    let rendered = match format {
        GraphFormat::Dot => response.dot.clone(),
        GraphFormat::Json => serde_json::to_string_pretty(&response)?,
    };

    match output {
        Some(output_path) => {
            std::fs::write(&output_path, &rendered)?;
            println!("💾 Saved to: {}", output_path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
