//! A project's files plus the entries whose content is not source text.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::VirtualFileSet;

/// Files loaded for a scan.
///
/// Paths listed in `opaque` came in as something other than text (a JSON
/// object, array, number, ...). Their rendering still takes part in the
/// pattern check, but they never contribute imports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSnapshot {
    /// Path -> text.
    pub files: VirtualFileSet,

    /// Paths whose text must not be scanned for imports.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub opaque: BTreeSet<String>,
}

impl FileSnapshot {
    /// Snapshot where every entry is source text.
    pub fn new(files: VirtualFileSet) -> Self {
        Self {
            files,
            opaque: BTreeSet::new(),
        }
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the snapshot holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether `path` is exempt from import extraction.
    pub fn is_opaque(&self, path: &str) -> bool {
        self.opaque.contains(path)
    }

    /// Total size in bytes of all file contents.
    pub fn total_bytes(&self) -> u64 {
        self.files.values().map(|text| text.len() as u64).sum()
    }
}

impl From<VirtualFileSet> for FileSnapshot {
    fn from(files: VirtualFileSet) -> Self {
        Self::new(files)
    }
}
