//! Tool implementations for the MCP server.

use std::sync::Arc;

use import_scout_core::{extract_imports, FileSnapshot, GraphScanner, ScanResult, TracingObserver};
use import_scout_ops::locate_key;
use serde_json::Value;

use crate::types::*;

/// Tool executor that implements the actual logic.
pub struct ToolExecutor {
    pub snapshot: Arc<FileSnapshot>,
    pub scanner: GraphScanner,
    pub default_max_depth: usize,
}

impl ToolExecutor {
    pub fn new(snapshot: Arc<FileSnapshot>, scanner: GraphScanner, default_max_depth: usize) -> Self {
        Self {
            snapshot,
            scanner,
            default_max_depth,
        }
    }

    /// Breadth-first search for the first reachable file containing the pattern.
    ///
    /// `args` goes through the scanner's JSON entry point, so inline
    /// `files`/`currentFiles` replace the loaded project and malformed input
    /// comes back inside the result.
    pub fn find_file_with_pattern(&self, args: &Value) -> ScanResult {
        self.scanner.scan_json_over(
            args,
            Some(&self.snapshot),
            self.default_max_depth,
            &mut TracingObserver,
        )
    }

    /// Relative imports of one file, or `None` if the file is not loaded.
    pub fn list_imports(&self, input: ListImportsInput) -> Option<ListImportsOutput> {
        let file = locate_key(&self.snapshot.files, &input.file);
        let imports = self.scanner.snapshot_import_edges(&self.snapshot, &file)?;
        let resolved_count = imports.iter().filter(|e| e.resolved.is_some()).count();

        Some(ListImportsOutput {
            file,
            imports,
            resolved_count,
        })
    }

    /// List loaded files with optional filters.
    pub fn list_files(&self, input: ListFilesInput) -> ListFilesOutput {
        let extension = input
            .extension
            .as_deref()
            .map(|ext| format!(".{}", ext.trim_start_matches('.')));

        let mut files: Vec<FileInfo> = self
            .snapshot
            .files
            .iter()
            .filter(|(path, _)| {
                if let Some(ref prefix) = input.path {
                    if !path.starts_with(prefix.as_str()) {
                        return false;
                    }
                }
                if let Some(ref ext) = extension {
                    if !path.ends_with(ext.as_str()) {
                        return false;
                    }
                }
                true
            })
            .map(|(path, text)| FileInfo {
                path: path.clone(),
                bytes: text.len(),
                import_count: if self.snapshot.is_opaque(path) {
                    0
                } else {
                    extract_imports(text).len()
                },
            })
            .collect();

        let total = files.len();
        files.truncate(input.limit);

        ListFilesOutput {
            files,
            total,
            path: input.path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use import_scout_core::VirtualFileSet;
    use serde_json::json;

    fn executor() -> ToolExecutor {
        let mut files = VirtualFileSet::new();
        files.insert(
            "/src/App.js".into(),
            "import Nav from './Nav'\nimport gone from './gone'\n".into(),
        );
        files.insert("/src/Nav.tsx".into(), "fetch(process.env.API)".into());
        files.insert("/README.md".into(), "# readme".into());
        ToolExecutor::new(Arc::new(FileSnapshot::new(files)), GraphScanner::new(), 5)
    }

    #[test]
    fn test_find_file_with_pattern_uses_loaded_files() {
        let result = executor().find_file_with_pattern(&json!({
            "startFile": "/src/App.js",
            "searchPattern": "process.env",
        }));

        assert!(result.found);
        assert_eq!(result.import_path, vec!["/src/App.js", "/src/Nav.tsx"]);
    }

    #[test]
    fn test_find_file_with_pattern_inline_files() {
        let result = executor().find_file_with_pattern(&json!({
            "files": { "/a.js": "needle" },
            "startFile": "/a.js",
            "searchPattern": "needle",
            "maxDepth": 0,
        }));
        assert_eq!(result.filename.as_deref(), Some("/a.js"));
    }

    #[test]
    fn test_find_file_with_pattern_current_files_alias() {
        let result = executor().find_file_with_pattern(&json!({
            "currentFiles": {
                "/App.js": "import Foo from './Foo'",
                "/Foo.js": null,
                "/Bar.js": "process.env",
            },
            "startFile": "/App.js",
            "searchPattern": "process.env",
        }));
        assert!(result.error.is_none());
        assert!(!result.found);
        assert_eq!(result.scanned_files, vec!["/App.js", "/Foo.js"]);
    }

    #[test]
    fn test_find_file_with_pattern_invalid_files() {
        let result = executor().find_file_with_pattern(&json!({
            "files": "oops",
            "startFile": "/App.js",
            "searchPattern": "x",
        }));
        assert_eq!(result.error.as_deref(), Some("Invalid currentFiles object"));
    }

    #[test]
    fn test_find_file_with_pattern_unknown_start() {
        let result = executor().find_file_with_pattern(&json!({
            "startFile": "/nope.js",
            "searchPattern": "x",
        }));
        assert_eq!(result.error.as_deref(), Some("Start file not found: /nope.js"));
    }

    #[test]
    fn test_list_imports() {
        let executor = executor();
        let output = executor
            .list_imports(ListImportsInput {
                file: "src/App.js".into(),
            })
            .unwrap();
        assert_eq!(output.file, "/src/App.js");
        assert_eq!(output.imports.len(), 2);
        assert_eq!(output.resolved_count, 1);

        assert!(executor
            .list_imports(ListImportsInput {
                file: "/src/missing.js".into()
            })
            .is_none());
    }

    #[test]
    fn test_list_files_filters() {
        let output = executor().list_files(ListFilesInput {
            path: Some("/src".into()),
            extension: Some("tsx".into()),
            limit: 10,
        });
        assert_eq!(output.total, 1);
        assert_eq!(output.files[0].path, "/src/Nav.tsx");

        let output = executor().list_files(ListFilesInput {
            path: None,
            extension: None,
            limit: 1,
        });
        assert_eq!(output.total, 3);
        assert_eq!(output.files.len(), 1);
        assert_eq!(output.files[0].path, "/README.md");
    }
}
