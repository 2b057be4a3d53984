//! Whole import graph reachable from an entry file.
//!
//! Walks the same breadth-first frontier as the scanner, without a pattern,
//! and keeps every edge it sees, including imports that lead nowhere.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::scanner::GraphScanner;
use crate::{FileSnapshot, VirtualFileSet};

/// A file (or unresolved import target) in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportNode {
    /// Path in the snapshot, or the candidate path of an unresolved import.
    pub path: String,

    /// Whether the path exists in the snapshot.
    pub present: bool,
}

/// Flattened view of one import edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportGraphEdge {
    pub from: String,
    pub to: String,
    pub spec: String,
    pub resolved: bool,
}

/// Directed import graph: `a -> b` when `a` imports `b`.
#[derive(Debug, Clone, Default)]
pub struct ImportGraph {
    graph: StableDiGraph<ImportNode, String>,
    index: HashMap<String, NodeIndex>,
}

impl ImportGraph {
    /// Build the graph reachable from `start_file` within `max_depth` hops.
    ///
    /// Returns `None` if `start_file` is not in `files`.
    pub fn build(
        scanner: &GraphScanner,
        files: &VirtualFileSet,
        start_file: &str,
        max_depth: usize,
    ) -> Option<Self> {
        Self::walk(scanner, files, &BTreeSet::new(), start_file, max_depth)
    }

    /// Same as [`ImportGraph::build`]; opaque entries are leaves.
    pub fn from_snapshot(
        scanner: &GraphScanner,
        snapshot: &FileSnapshot,
        start_file: &str,
        max_depth: usize,
    ) -> Option<Self> {
        Self::walk(
            scanner,
            &snapshot.files,
            &snapshot.opaque,
            start_file,
            max_depth,
        )
    }

    fn walk(
        scanner: &GraphScanner,
        files: &VirtualFileSet,
        opaque: &BTreeSet<String>,
        start_file: &str,
        max_depth: usize,
    ) -> Option<Self> {
        if !files.contains_key(start_file) {
            return None;
        }

        let mut graph = Self::default();
        graph.node(start_file, true);

        let mut frontier = VecDeque::from([(start_file.to_string(), 0usize)]);
        let mut expanded: HashSet<String> = HashSet::new();

        while let Some((file, depth)) = frontier.pop_front() {
            if depth >= max_depth || !expanded.insert(file.clone()) {
                continue;
            }
            let Some(edges) = scanner.edges_of(files, opaque, &file) else {
                continue;
            };

            let from = graph.node(&file, true);
            for edge in edges {
                let (target, present) = match (&edge.resolved, &edge.candidate) {
                    (Some(resolved), _) => (resolved.clone(), true),
                    (None, Some(candidate)) => (candidate.clone(), false),
                    (None, None) => (edge.spec.clone(), false),
                };
                let to = graph.node(&target, present);
                graph.graph.add_edge(from, to, edge.spec);

                if present && !expanded.contains(&target) {
                    frontier.push_back((target, depth + 1));
                }
            }
        }

        Some(graph)
    }

    fn node(&mut self, path: &str, present: bool) -> NodeIndex {
        if let Some(&idx) = self.index.get(path) {
            return idx;
        }
        let idx = self.graph.add_node(ImportNode {
            path: path.to_string(),
            present,
        });
        self.index.insert(path.to_string(), idx);
        idx
    }

    /// Number of nodes, unresolved targets included.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of import edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> Vec<ImportNode> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].clone())
            .collect()
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> Vec<ImportGraphEdge> {
        IntoEdgeReferences::edge_references(&self.graph)
            .map(|edge| {
                let to = &self.graph[edge.target()];
                ImportGraphEdge {
                    from: self.graph[edge.source()].path.clone(),
                    to: to.path.clone(),
                    spec: edge.weight().clone(),
                    resolved: to.present,
                }
            })
            .collect()
    }

    /// Files that import `path` directly.
    pub fn importers(&self, path: &str) -> Vec<&str> {
        self.neighbors(path, Direction::Incoming)
    }

    /// Files `path` imports directly.
    pub fn imports(&self, path: &str) -> Vec<&str> {
        self.neighbors(path, Direction::Outgoing)
    }

    fn neighbors(&self, path: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.index.get(path) else {
            return Vec::new();
        };
        let mut found: Vec<&str> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].path.as_str())
            .collect();
        found.sort_unstable();
        found.dedup();
        found
    }

    /// Graphviz rendering; unresolved imports are dashed.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph imports {\n    rankdir=LR;\n");
        for node in self.nodes() {
            let style = if node.present { "" } else { ", style=dashed" };
            out.push_str(&format!("    {:?} [shape=box{}];\n", node.path, style));
        }
        for edge in self.edges() {
            let style = if edge.resolved { "" } else { ", style=dashed" };
            out.push_str(&format!(
                "    {:?} -> {:?} [label={:?}{}];\n",
                edge.from, edge.to, edge.spec, style
            ));
        }
        out.push_str("}\n");
        out
    }
}
