//! Request DTOs for operations.
//!
//! Each request type carries everything an operation needs, so the CLI and
//! the MCP server build the same values.

use std::path::PathBuf;

use import_scout_core::VirtualFileSet;
use serde::{Deserialize, Serialize};

use crate::source::FileSource;

/// Request to find the first reachable file containing a pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindRequest {
    /// Where the project files come from.
    pub source: FileSource,

    /// Entry file (`src/App.js` or `/src/App.js`); matched against the
    /// loaded keys with [`locate_key`].
    pub start_file: String,

    /// Literal substring to look for.
    pub pattern: String,

    /// Hop limit; falls back to the configured default.
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl FindRequest {
    /// Create a find request, detecting the source kind from `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        start_file: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        Self {
            source: FileSource::detect(path),
            start_file: clean_key(start_file.into()),
            pattern: pattern.into(),
            max_depth: None,
        }
    }

    /// Use an explicit source instead of detecting one.
    pub fn with_source(mut self, source: FileSource) -> Self {
        self.source = source;
        self
    }

    /// Override the hop limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Request to list the imports of one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportsRequest {
    /// Where the project files come from.
    pub source: FileSource,

    /// File whose imports are listed.
    pub file: String,
}

impl ImportsRequest {
    /// Create an imports request, detecting the source kind from `path`.
    pub fn new(path: impl Into<PathBuf>, file: impl Into<String>) -> Self {
        Self {
            source: FileSource::detect(path),
            file: clean_key(file.into()),
        }
    }
}

/// Request to build the import graph reachable from an entry file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphRequest {
    /// Where the project files come from.
    pub source: FileSource,

    /// Entry file.
    pub start_file: String,

    /// Hop limit; falls back to the configured default.
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl GraphRequest {
    /// Create a graph request, detecting the source kind from `path`.
    pub fn new(path: impl Into<PathBuf>, start_file: impl Into<String>) -> Self {
        Self {
            source: FileSource::detect(path),
            start_file: clean_key(start_file.into()),
            max_depth: None,
        }
    }

    /// Override the hop limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Forward slashes, no leading `./`.
pub fn clean_key(file: String) -> String {
    let file = file.replace('\\', "/");
    file.trim_start_matches("./").to_string()
}

/// Map a user-supplied path onto the key style of `files`.
///
/// An exact key wins. Otherwise the path is rooted with `/` when the loaded
/// keys are rooted (directory loads always are) and left bare when they are not.
pub fn locate_key(files: &VirtualFileSet, key: &str) -> String {
    if files.contains_key(key) {
        return key.to_string();
    }

    let bare = key.trim_start_matches('/');
    let rooted = files
        .keys()
        .next()
        .map(|k| k.starts_with('/'))
        .unwrap_or(true);

    if rooted {
        format!("/{}", bare)
    } else {
        bare.to_string()
    }
}
