//! Types for MCP tool inputs and outputs.

use std::collections::BTreeMap;

use import_scout_core::ImportEdge;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Tool Input Types
// =============================================================================

/// Input for the `find_file_with_pattern` tool.
///
/// Calls are parsed leniently by the scanner's JSON entry point; this type
/// describes the accepted shape.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindFileInput {
    /// Entry file the search starts from (e.g. "/src/App.js").
    pub start_file: String,

    /// Literal text to look for.
    pub search_pattern: String,

    /// Maximum number of import hops from the entry file.
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Files to search instead of the loaded project: path -> source text.
    /// Non-string values are searched but never followed for imports.
    #[serde(default)]
    pub files: Option<BTreeMap<String, Value>>,

    /// Alias of `files`.
    #[serde(default)]
    pub current_files: Option<BTreeMap<String, Value>>,
}

/// Input for the `list_imports` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListImportsInput {
    /// File whose relative imports are listed (e.g. "/src/App.js").
    pub file: String,
}

/// Input for the `list_files` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListFilesInput {
    /// Only list files whose path starts with this prefix.
    #[serde(default)]
    pub path: Option<String>,

    /// Filter by file extension (e.g., "ts", "jsx").
    #[serde(default)]
    pub extension: Option<String>,

    /// Maximum number of results to return.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    100
}

// =============================================================================
// Tool Output Types
// =============================================================================

/// Output for the `list_imports` tool.
#[derive(Debug, Clone, Serialize)]
pub struct ListImportsOutput {
    /// The queried file.
    pub file: String,

    /// Relative imports in source order.
    pub imports: Vec<ImportEdge>,

    /// How many of them resolved to a file.
    pub resolved_count: usize,
}

/// A file in the loaded project.
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    /// Snapshot path.
    pub path: String,

    /// Size of the source text.
    pub bytes: usize,

    /// Number of relative imports found in the file.
    pub import_count: usize,
}

/// Output for the `list_files` tool.
#[derive(Debug, Clone, Serialize)]
pub struct ListFilesOutput {
    /// Matching files, sorted by path.
    pub files: Vec<FileInfo>,

    /// Number of matches before the limit was applied.
    pub total: usize,

    /// Path filter that was used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}
