//! Imports command implementation.

use std::path::Path;

use anyhow::Result;
use import_scout_ops::{ImportsRequest, OpsContext};

/// Print the relative imports of `file`.
pub async fn execute(ctx: &OpsContext, path: &Path, file: &str, json: bool) -> Result<()> {
    let response = ctx.imports(ImportsRequest::new(path, file)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("📄 {}", response.file);
    if response.imports.is_empty() {
        println!("   (no relative imports)");
        return Ok(());
    }

    for edge in &response.imports {
        match &edge.resolved {
            Some(resolved) => println!("   {} -> {}", edge.spec, resolved),
            None => println!("   {} -> (unresolved)", edge.spec),
        }
    }

    Ok(())
}
