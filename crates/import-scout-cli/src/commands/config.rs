//! Config command implementation.
//!
//! Manages CLI configuration.

use anyhow::Result;
use import_scout_ops::Config;

/// Show current configuration.
pub fn show(config: &Config) -> Result<()> {
    println!("Import-Scout Configuration");
    println!("{:-<40}", "");

    for key in Config::keys() {
        let value = config.get(key).unwrap_or_else(|| "(not set)".to_string());
        println!("{:<22}{}", key, value);
    }

    if let Some(config_path) = Config::config_file_path() {
        println!("\nConfig file: {}", config_path.display());
    }

    Ok(())
}

/// Set a configuration value.
pub fn set(config: &mut Config, key: &str, value: &str) -> Result<()> {
    if let Err(err) = config.set(key, value) {
        anyhow::bail!("{}. Valid keys: {}", err, Config::keys().join(", "));
    }

    config.save()?;
    println!(
        "Set {} to: {}",
        key,
        config.get(key).unwrap_or_else(|| "(not set)".to_string())
    );
    Ok(())
}

/// Get a configuration value.
pub fn get(config: &Config, key: &str) -> Result<()> {
    if !Config::keys().contains(&key) {
        anyhow::bail!("Unknown config key: {}", key);
    }

    let value = config.get(key).unwrap_or_else(|| "(not set)".to_string());
    println!("{}", value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn reset() -> Result<()> {
    let config = Config::default();
    config.save()?;
    println!("Configuration reset to defaults");
    Ok(())
}
