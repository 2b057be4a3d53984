//! Configuration for the operations layer.

use std::path::PathBuf;

use directories::ProjectDirs;
use import_scout_core::{ExtensionProber, ScannerConfig, DEFAULT_EXTENSIONS, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};

use crate::error::{OpsError, OpsResult};

/// Environment variable that points at an alternative config file.
pub const CONFIG_PATH_ENV: &str = "ISCOUT_CONFIG";

/// Configuration for import-scout operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Hop limit used when a request does not specify one.
    #[serde(default = "default_max_depth")]
    pub default_max_depth: usize,

    /// Suffixes tried when an import omits its extension.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Also resolve `./dir` to `./dir/index.<ext>`.
    #[serde(default)]
    pub resolve_index_files: bool,

    /// Treat imports that climb above the project root as unresolved.
    #[serde(default)]
    pub strict_paths: bool,

    /// Files larger than this (in KB) are left out of directory snapshots.
    #[serde(default = "default_max_file_size_kb")]
    pub max_file_size_kb: u64,

    /// Wall-clock limit for a whole operation; no limit when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_timeout_ms: Option<u64>,

    /// Directory names skipped when loading a project from disk.
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

fn default_max_file_size_kb() -> u64 {
    512
}

fn default_ignore_dirs() -> Vec<String> {
    [
        "node_modules",
        "target",
        "dist",
        "build",
        "coverage",
        "vendor",
        ".next",
        ".turbo",
        ".git",
        "__pycache__",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_max_depth: default_max_depth(),
            extensions: default_extensions(),
            resolve_index_files: false,
            strict_paths: false,
            max_file_size_kb: default_max_file_size_kb(),
            scan_timeout_ms: None,
            ignore_dirs: default_ignore_dirs(),
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    /// Load configuration from disk with environment overrides.
    pub fn load() -> OpsResult<Self> {
        let config = match Self::config_file_path() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(&path)?;
                serde_json::from_str(&contents)?
            }
            _ => Self::default(),
        };

        Ok(config.with_env_overrides())
    }

    /// Apply `ISCOUT_*` environment variables on top of `self`.
    pub fn with_env_overrides(self) -> Self {
        Self {
            default_max_depth: env_number("ISCOUT_MAX_DEPTH").unwrap_or(self.default_max_depth),
            strict_paths: env_flag("ISCOUT_STRICT_PATHS").unwrap_or(self.strict_paths),
            resolve_index_files: env_flag("ISCOUT_INDEX_FILES")
                .unwrap_or(self.resolve_index_files),
            max_file_size_kb: env_number("ISCOUT_MAX_FILE_SIZE_KB")
                .unwrap_or(self.max_file_size_kb),
            scan_timeout_ms: env_number("ISCOUT_SCAN_TIMEOUT_MS").or(self.scan_timeout_ms),
            ..self
        }
    }

    /// Save configuration to disk.
    pub fn save(&self) -> OpsResult<()> {
        if let Some(path) = Self::config_file_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(self)?;
            std::fs::write(&path, contents)?;
        }
        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_file_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("dev", "import-scout", "iscout")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Scanner settings derived from this configuration.
    pub fn scanner_config(&self) -> ScannerConfig {
        ScannerConfig {
            prober: ExtensionProber::new()
                .with_extensions(self.extensions.iter().cloned())
                .with_index_files(self.resolve_index_files),
            strict_paths: self.strict_paths,
        }
    }

    /// Maximum file size in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_kb.saturating_mul(1024)
    }

    /// Get a configuration value by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default_max_depth" => Some(self.default_max_depth.to_string()),
            "extensions" => Some(
                self.extensions
                    .iter()
                    .map(|e| if e.is_empty() { "(none)" } else { e.as_str() })
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            "resolve_index_files" => Some(self.resolve_index_files.to_string()),
            "strict_paths" => Some(self.strict_paths.to_string()),
            "max_file_size_kb" => Some(self.max_file_size_kb.to_string()),
            "scan_timeout_ms" => self.scan_timeout_ms.map(|t| t.to_string()),
            "ignore_dirs" => Some(self.ignore_dirs.join(",")),
            _ => None,
        }
    }

    /// Set a configuration value by key.
    ///
    /// List values are comma separated; an empty entry in `extensions`
    /// stands for "exact path".
    pub fn set(&mut self, key: &str, value: &str) -> OpsResult<()> {
        match key {
            "default_max_depth" => {
                self.default_max_depth = parse_number(value)?;
            }
            "extensions" => {
                self.extensions = value
                    .split(',')
                    .map(|e| e.trim())
                    .map(|e| if e == "(none)" { "" } else { e })
                    .map(|e| {
                        if e.is_empty() || e.starts_with('.') {
                            e.to_string()
                        } else {
                            format!(".{}", e)
                        }
                    })
                    .collect();
            }
            "resolve_index_files" => {
                self.resolve_index_files = parse_bool(value)?;
            }
            "strict_paths" => {
                self.strict_paths = parse_bool(value)?;
            }
            "max_file_size_kb" => {
                self.max_file_size_kb = parse_number(value)?;
            }
            "scan_timeout_ms" => {
                self.scan_timeout_ms = match value.trim() {
                    "" | "none" | "off" => None,
                    other => Some(parse_number(other)?),
                };
            }
            "ignore_dirs" => {
                self.ignore_dirs = value
                    .split(',')
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty())
                    .collect();
            }
            _ => {
                return Err(OpsError::Config(format!("Unknown config key: {}", key)));
            }
        }
        Ok(())
    }

    /// All keys accepted by [`Config::get`] and [`Config::set`].
    pub fn keys() -> &'static [&'static str] {
        &[
            "default_max_depth",
            "extensions",
            "resolve_index_files",
            "strict_paths",
            "max_file_size_kb",
            "scan_timeout_ms",
            "ignore_dirs",
        ]
    }
}

fn parse_number<T: std::str::FromStr>(value: &str) -> OpsResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| OpsError::Config(format!("Invalid number: {}", value)))
}

fn parse_bool(value: &str) -> OpsResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(OpsError::Config(format!("Invalid boolean: {}", value))),
    }
}
