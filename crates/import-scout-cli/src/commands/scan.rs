//! Scan command implementation.
//!
//! Feeds a JSON request straight to the scanner and prints the JSON result.
//! Malformed requests still produce a result object carrying `error`.
//! A request without `maxDepth` uses the configured default depth.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use import_scout_core::{GraphScanner, TracingObserver};
use import_scout_ops::Config;

/// Run the request at `request` (`-` for stdin).
pub fn execute(config: &Config, request: &Path) -> Result<()> {
    let raw = if request == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(request)
            .with_context(|| format!("Failed to read request from {}", request.display()))?
    };

    let value: serde_json::Value = serde_json::from_str(&raw).context("Request is not valid JSON")?;

    let scanner = GraphScanner::with_config(config.scanner_config());
    let result = scanner.scan_json_over(
        &value,
        None,
        config.default_max_depth,
        &mut TracingObserver,
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
