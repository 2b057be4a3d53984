//! Find command implementation.

use std::path::Path;

use anyhow::Result;
use import_scout_ops::{FindRequest, OpsContext};

/// Search the import graph from `start` for `pattern` and print the outcome.
pub async fn execute(
    ctx: &OpsContext,
    path: &Path,
    start: &str,
    pattern: &str,
    max_depth: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut request = FindRequest::new(path, start, pattern);
    if let Some(depth) = max_depth {
        request = request.with_max_depth(depth);
    }

    let response = ctx.find(request).await?;
    let result = &response.result;

    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    if let Some(error) = &result.error {
        anyhow::bail!("{}", error);
    }

    match (&result.filename, result.hops()) {
        (Some(filename), Some(hops)) => {
            println!("✅ Found \"{}\" in {}", pattern, filename);
            println!("   Hops: {}", hops);
            println!("   Import path:");
            for (i, file) in result.import_path.iter().enumerate() {
                println!("   {}{}", "  ".repeat(i), file);
            }
        }
        _ => {
            println!(
                "❌ \"{}\" not found within {} hops of {}",
                pattern, response.max_depth, start
            );
        }
    }

    println!(
        "   Scanned {} of {} files ({})",
        result.scanned_files.len(),
        response.file_count,
        response.human_size()
    );

    Ok(())
}
