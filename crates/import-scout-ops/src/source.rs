//! Loading a [`FileSnapshot`] from disk.
//!
//! A project is either a directory, walked recursively, or a JSON snapshot
//! mapping paths to source text.

use std::path::{Path, PathBuf};

use import_scout_core::{FileSnapshot, VirtualFileSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{OpsError, OpsResult};

/// Where the project snapshot comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileSource {
    /// A directory on disk; keys become `/`-rooted relative paths.
    Directory { path: PathBuf },
    /// A JSON object of path -> text.
    Snapshot { path: PathBuf },
}

impl FileSource {
    /// Create a directory source.
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::Directory { path: path.into() }
    }

    /// Create a snapshot source.
    pub fn snapshot(path: impl Into<PathBuf>) -> Self {
        Self::Snapshot { path: path.into() }
    }

    /// Pick the source kind from a path: `*.json` files are snapshots,
    /// everything else is treated as a directory.
    pub fn detect(input: impl Into<PathBuf>) -> Self {
        let path = input.into();
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json && !path.is_dir() {
            Self::Snapshot { path }
        } else {
            Self::Directory { path }
        }
    }

    /// Path on disk.
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory { path } | Self::Snapshot { path } => path,
        }
    }

    /// Load the files this source describes.
    pub fn load(&self, config: &Config) -> OpsResult<FileSnapshot> {
        match self {
            Self::Directory { path } => load_directory(path, config).map(FileSnapshot::new),
            Self::Snapshot { path } => load_snapshot(path),
        }
    }
}

/// Check if entry is hidden (starts with .).
fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

/// Check if entry is a directory the config tells us to skip.
fn is_ignored(entry: &walkdir::DirEntry, config: &Config) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|s| config.ignore_dirs.iter().any(|d| d == s))
            .unwrap_or(false)
}

/// Snapshot key for `path` under `root`: `/`-prefixed, forward slashes.
fn virtual_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    Some(format!("/{}", parts.join("/")))
}

/// Walk `root` and collect every readable UTF-8 text file.
pub fn load_directory(root: &Path, config: &Config) -> OpsResult<VirtualFileSet> {
    if !root.is_dir() {
        return Err(OpsError::SourceNotFound {
            path: root.to_path_buf(),
        });
    }

    let max_size = config.max_file_size_bytes();
    let mut files = VirtualFileSet::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e) && !is_ignored(e, config))
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        if let Ok(meta) = entry.metadata() {
            if meta.len() > max_size {
                debug!(path = %entry.path().display(), size = meta.len(), "Skipping large file");
                continue;
            }
        }

        let Some(key) = virtual_key(root, entry.path()) else {
            continue;
        };

        match std::fs::read_to_string(entry.path()) {
            Ok(text) => {
                files.insert(key, text);
            }
            Err(err) => {
                debug!(path = %entry.path().display(), error = %err, "Skipping unreadable file");
            }
        }
    }

    debug!(root = %root.display(), files = files.len(), "Loaded directory snapshot");
    Ok(files)
}

/// Read a JSON snapshot (`{ "/path": "text", ... }`).
///
/// Non-string values are kept as opaque entries: searchable, never parsed
/// for imports.
pub fn load_snapshot(path: &Path) -> OpsResult<FileSnapshot> {
    if !path.is_file() {
        return Err(OpsError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| OpsError::invalid_snapshot(path, e.to_string()))?;

    let snapshot = FileSnapshot::from_value(&value)
        .ok_or_else(|| OpsError::invalid_snapshot(path, "expected a JSON object of path -> text"))?;

    if !snapshot.opaque.is_empty() {
        warn!(
            path = %path.display(),
            non_text = snapshot.opaque.len(),
            "Snapshot has non-string file contents"
        );
    }

    Ok(snapshot)
}
