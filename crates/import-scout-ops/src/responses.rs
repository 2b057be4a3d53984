//! Response DTOs for operations.

use import_scout_core::{ImportEdge, ImportGraphEdge, ImportNode, ScanResult};
use serde::{Deserialize, Serialize};

/// Response from a find operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindResponse {
    /// Scanner outcome.
    pub result: ScanResult,

    /// Number of files in the loaded snapshot.
    pub file_count: usize,

    /// Total size of the loaded snapshot.
    pub total_bytes: u64,

    /// Hop limit actually used.
    pub max_depth: usize,
}

impl FindResponse {
    /// Snapshot size for display (`12.3 kB`).
    pub fn human_size(&self) -> String {
        humansize::format_size(self.total_bytes, humansize::DECIMAL)
    }
}

/// Response from an imports operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportsResponse {
    /// File whose imports were listed.
    pub file: String,

    /// One entry per relative import, in source order.
    pub imports: Vec<ImportEdge>,
}

impl ImportsResponse {
    /// Imports that did not match any file.
    pub fn unresolved(&self) -> impl Iterator<Item = &ImportEdge> {
        self.imports.iter().filter(|edge| edge.resolved.is_none())
    }
}

/// Response from a graph operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphResponse {
    /// Entry file.
    pub start_file: String,

    /// Nodes reachable from the entry, unresolved targets included.
    pub nodes: Vec<ImportNode>,

    /// Import edges.
    pub edges: Vec<ImportGraphEdge>,

    /// Graphviz rendering.
    pub dot: String,
}

impl GraphResponse {
    /// Get node count.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get edge count.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of edges whose target is missing from the snapshot.
    pub fn unresolved_count(&self) -> usize {
        self.edges.iter().filter(|edge| !edge.resolved).count()
    }
}
