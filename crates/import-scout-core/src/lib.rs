//! Core domain types and the import-graph file scanner.
//!
//! Given an in-memory snapshot of a JavaScript/TypeScript project and an entry
//! file, [`GraphScanner`] walks the *local* import graph breadth-first and
//! reports the first reachable file whose text contains a search pattern,
//! together with the chain of imports that leads to it.
//!
//! ```
//! use import_scout_core::{GraphScanner, ScanRequest, VirtualFileSet};
//!
//! let mut files = VirtualFileSet::new();
//! files.insert("/App.js".into(), "import Foo from './Foo'".into());
//! files.insert("/Foo.js".into(), "process.env.X".into());
//!
//! let result = GraphScanner::new().scan(&ScanRequest::new(files, "/App.js", "process."));
//! assert!(result.found);
//! assert_eq!(result.import_path, vec!["/App.js", "/Foo.js"]);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

mod error;
mod graph;
mod imports;
mod json;
mod observer;
mod probe;
mod resolve;
mod scanner;
mod snapshot;

pub use error::ResolveError;
pub use graph::{ImportGraph, ImportGraphEdge, ImportNode};
pub use imports::extract_imports;
pub use json::scan_json;
pub use observer::{NoopObserver, ScanObserver, TracingObserver};
pub use probe::{ExtensionProber, DEFAULT_EXTENSIONS};
pub use resolve::{resolve, resolve_strict};
pub use scanner::{GraphScanner, ImportEdge, ScannerConfig};
pub use snapshot::FileSnapshot;

/// Hop limit used when a request does not name one.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// In-memory project snapshot: path -> source text.
///
/// Paths are absolute-style (`/src/App.js`). The scanner only ever reads it.
pub type VirtualFileSet = BTreeMap<String, String>;

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Parameters of a single scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    /// Project snapshot to search.
    pub files: VirtualFileSet,

    /// Entry point the traversal starts from.
    pub start_file: String,

    /// Literal substring to look for.
    pub search_pattern: String,

    /// Maximum number of import hops from `start_file`.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Files whose content is searched but never parsed for imports.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub opaque_files: BTreeSet<String>,
}

impl ScanRequest {
    /// Create a request with the default hop limit.
    pub fn new(
        files: VirtualFileSet,
        start_file: impl Into<String>,
        search_pattern: impl Into<String>,
    ) -> Self {
        Self {
            files,
            start_file: start_file.into(),
            search_pattern: search_pattern.into(),
            max_depth: DEFAULT_MAX_DEPTH,
            opaque_files: BTreeSet::new(),
        }
    }

    /// Create a request over a loaded snapshot, keeping its opaque entries.
    pub fn from_snapshot(
        snapshot: FileSnapshot,
        start_file: impl Into<String>,
        search_pattern: impl Into<String>,
    ) -> Self {
        let FileSnapshot { files, opaque } = snapshot;
        Self::new(files, start_file, search_pattern).with_opaque_files(opaque)
    }

    /// Mark files whose content must not be parsed for imports.
    pub fn with_opaque_files(mut self, opaque_files: BTreeSet<String>) -> Self {
        self.opaque_files = opaque_files;
        self
    }

    /// Override the hop limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Outcome of a scan.
///
/// Failures are reported through `error`, never by panicking, so callers
/// always branch on `found` / `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Whether a reachable file contains the pattern.
    pub found: bool,

    /// The matching file, if any.
    pub filename: Option<String>,

    /// Every file visited, in visitation order, without duplicates.
    pub scanned_files: Vec<String>,

    /// Import chain from the start file to `filename`; empty when not found.
    pub import_path: Vec<String>,

    /// Validation failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanResult {
    /// A failed-validation result carrying `message`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// A successful match.
    pub fn matched(filename: String, scanned_files: Vec<String>, import_path: Vec<String>) -> Self {
        Self {
            found: true,
            filename: Some(filename),
            scanned_files,
            import_path,
            error: None,
        }
    }

    /// The traversal finished without a match.
    pub fn exhausted(scanned_files: Vec<String>) -> Self {
        Self {
            scanned_files,
            ..Self::default()
        }
    }

    /// Number of import hops to the match, if one was found.
    pub fn hops(&self) -> Option<usize> {
        if self.found {
            Some(self.import_path.len().saturating_sub(1))
        } else {
            None
        }
    }
}
