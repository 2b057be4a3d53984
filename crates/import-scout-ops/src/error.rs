//! Error types for the operations layer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Errors that can occur while preparing or running a scan.
///
/// Scan-level failures (unknown start file, malformed request) are not
/// errors here: they travel inside [`import_scout_core::ScanResult`].
#[derive(Debug, Error)]
pub enum OpsError {
    /// The directory or snapshot file does not exist.
    #[error("No project found at {path}")]
    SourceNotFound { path: PathBuf },

    /// The snapshot file is not a JSON object of path -> text.
    #[error("Invalid snapshot {path}: {message}")]
    InvalidSnapshot { path: PathBuf, message: String },

    /// The requested file is not part of the loaded snapshot.
    #[error("File not found in snapshot: {file}")]
    FileNotFound { file: String },

    /// The operation exceeded the configured deadline.
    #[error("Operation timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context.
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl OpsError {
    /// Create a new error with additional context.
    pub fn with_context(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an invalid snapshot error.
    pub fn invalid_snapshot(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<tokio::task::JoinError> for OpsError {
    fn from(err: tokio::task::JoinError) -> Self {
        OpsError::with_context("Background task failed", err.to_string())
    }
}
