//! CLI configuration loading.
//!
//! Precedence, lowest first: built-in defaults, the config file, a `.env`
//! file in the working directory, then real environment variables.

use anyhow::{Context, Result};
use import_scout_ops::Config;

/// Load configuration for this invocation.
pub fn load() -> Result<Config> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    Config::load().with_context(|| {
        format!(
            "Failed to load config from {}",
            Config::config_file_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(no config path)".to_string())
        )
    })
}
