//! Breadth-first search over the local import graph.

use std::collections::{BTreeSet, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::imports::extract_imports;
use crate::observer::{NoopObserver, ScanObserver};
use crate::probe::ExtensionProber;
use crate::resolve::{resolve, resolve_strict};
use crate::{FileSnapshot, ScanRequest, ScanResult, VirtualFileSet};

/// Tunables for [`GraphScanner`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannerConfig {
    /// How extension-less candidates are matched against the file set.
    pub prober: ExtensionProber,

    /// Treat imports that climb above the root as unresolved instead of
    /// clamping them at the root.
    pub strict_paths: bool,
}

/// One import statement of a file and what it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEdge {
    /// Raw specifier as written in the source.
    pub spec: String,

    /// Normalized path before extension probing; `None` when strict
    /// resolution rejected the specifier.
    pub candidate: Option<String>,

    /// File the import lands on, if it exists in the snapshot.
    pub resolved: Option<String>,
}

/// Work item of the traversal.
#[derive(Debug, Clone)]
struct FrontierEntry {
    file: String,
    depth: usize,
    import_path: Vec<String>,
}

impl FrontierEntry {
    fn root(file: &str) -> Self {
        Self {
            file: file.to_string(),
            depth: 0,
            import_path: vec![file.to_string()],
        }
    }

    fn child(&self, file: String) -> Self {
        let mut import_path = self.import_path.clone();
        import_path.push(file.clone());
        Self {
            file,
            depth: self.depth + 1,
            import_path,
        }
    }
}

/// Finds the first file reachable from an entry point that contains a pattern.
///
/// Each scan owns its frontier and visited set, so one scanner can serve
/// concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct GraphScanner {
    config: ScannerConfig,
}

impl GraphScanner {
    /// Scanner with default resolution rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scanner with explicit configuration.
    pub fn with_config(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Run a scan without progress reporting.
    pub fn scan(&self, request: &ScanRequest) -> ScanResult {
        self.scan_with(request, &mut NoopObserver)
    }

    /// Run a scan, reporting progress to `observer`.
    pub fn scan_with<O>(&self, request: &ScanRequest, observer: &mut O) -> ScanResult
    where
        O: ScanObserver + ?Sized,
    {
        let ScanRequest {
            files,
            start_file,
            search_pattern,
            max_depth,
            opaque_files,
        } = request;
        let max_depth = *max_depth;

        observer.on_start(start_file, search_pattern, max_depth);

        if !files.contains_key(start_file) {
            let result = ScanResult::failure(format!("Start file not found: {}", start_file));
            observer.on_finish(&result);
            return result;
        }

        let mut frontier = VecDeque::from([FrontierEntry::root(start_file)]);
        let mut visited: HashSet<String> = HashSet::new();
        let mut scanned_files: Vec<String> = Vec::new();

        while let Some(entry) = frontier.pop_front() {
            if visited.contains(&entry.file) || entry.depth > max_depth {
                continue;
            }
            visited.insert(entry.file.clone());
            scanned_files.push(entry.file.clone());
            observer.on_visit(&entry.file, entry.depth);

            let Some(source) = files.get(&entry.file) else {
                observer.on_dangling(&entry.file);
                continue;
            };

            if source.contains(search_pattern.as_str()) {
                let result = ScanResult::matched(entry.file, scanned_files, entry.import_path);
                observer.on_finish(&result);
                return result;
            }

            if entry.depth >= max_depth || opaque_files.contains(&entry.file) {
                continue;
            }

            for spec in extract_imports(source) {
                match self.resolve_import(files, &entry.file, &spec) {
                    Some(next) if !visited.contains(&next) => {
                        let child = entry.child(next);
                        observer.on_enqueue(&child.file, child.depth, frontier.len() + 1);
                        frontier.push_back(child);
                    }
                    Some(_) => {}
                    None => observer.on_unresolved(&entry.file, &spec),
                }
            }
        }

        let result = ScanResult::exhausted(scanned_files);
        observer.on_finish(&result);
        result
    }

    /// Normalize `spec` relative to `from`, honoring `strict_paths`.
    pub fn candidate_path(&self, from: &str, spec: &str) -> Option<String> {
        if self.config.strict_paths {
            resolve_strict(from, spec).ok()
        } else {
            Some(resolve(from, spec))
        }
    }

    /// Resolve and probe one import edge of `from`.
    pub fn resolve_import(&self, files: &VirtualFileSet, from: &str, spec: &str) -> Option<String> {
        let candidate = self.candidate_path(from, spec)?;
        self.config.prober.probe(files, &candidate)
    }

    /// Every relative import of `file` with its resolution, in source order.
    ///
    /// Returns `None` when `file` is not in the snapshot.
    pub fn import_edges(&self, files: &VirtualFileSet, file: &str) -> Option<Vec<ImportEdge>> {
        self.edges_of(files, &BTreeSet::new(), file)
    }

    /// Like [`GraphScanner::import_edges`]; opaque entries have no imports.
    pub fn snapshot_import_edges(
        &self,
        snapshot: &FileSnapshot,
        file: &str,
    ) -> Option<Vec<ImportEdge>> {
        self.edges_of(&snapshot.files, &snapshot.opaque, file)
    }

    pub(crate) fn edges_of(
        &self,
        files: &VirtualFileSet,
        opaque: &BTreeSet<String>,
        file: &str,
    ) -> Option<Vec<ImportEdge>> {
        let source = files.get(file)?;
        if opaque.contains(file) {
            return Some(Vec::new());
        }
        let edges = extract_imports(source)
            .into_iter()
            .map(|spec| {
                let candidate = self.candidate_path(file, &spec);
                let resolved = candidate
                    .as_deref()
                    .and_then(|c| self.config.prober.probe(files, c));
                ImportEdge {
                    spec,
                    candidate,
                    resolved,
                }
            })
            .collect();
        Some(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_set(entries: &[(&str, &str)]) -> VirtualFileSet {
        entries
            .iter()
            .map(|(path, text)| (path.to_string(), text.to_string()))
            .collect()
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ScanObserver for Recorder {
        fn on_start(&mut self, start_file: &str, _pattern: &str, max_depth: usize) {
            self.events.push(format!("start {} {}", start_file, max_depth));
        }

        fn on_visit(&mut self, file: &str, depth: usize) {
            self.events.push(format!("visit {} {}", file, depth));
        }

        fn on_unresolved(&mut self, from: &str, spec: &str) {
            self.events.push(format!("unresolved {} {}", from, spec));
        }

        fn on_finish(&mut self, result: &ScanResult) {
            self.events.push(format!("finish {}", result.found));
        }
    }

    #[test]
    fn test_breadth_first_prefers_shortest_path() {
        let files = file_set(&[
            ("/App.js", "import A from './A';\nimport Target from './Target';"),
            ("/A.js", "import Target from './Target';"),
            ("/Target.js", "NEEDLE"),
        ]);
        let result = GraphScanner::new().scan(&ScanRequest::new(files, "/App.js", "NEEDLE"));

        assert!(result.found);
        assert_eq!(result.import_path, vec!["/App.js", "/Target.js"]);
        assert_eq!(result.scanned_files, vec!["/App.js", "/A.js", "/Target.js"]);
    }

    #[test]
    fn test_start_file_match_needs_no_imports() {
        let files = file_set(&[("/App.js", "process.env.NODE_ENV")]);
        let result = GraphScanner::new().scan(&ScanRequest::new(files, "/App.js", "process."));

        assert_eq!(result.filename.as_deref(), Some("/App.js"));
        assert_eq!(result.import_path, vec!["/App.js"]);
        assert_eq!(result.hops(), Some(0));
    }

    #[test]
    fn test_missing_import_is_skipped() {
        let files = file_set(&[
            ("/App.js", "import Gone from './Gone';\nimport Foo from './Foo';"),
            ("/Foo.js", "window.secret"),
        ]);
        let result = GraphScanner::new().scan(&ScanRequest::new(files, "/App.js", "window."));

        assert!(result.found);
        assert_eq!(result.filename.as_deref(), Some("/Foo.js"));
    }

    #[test]
    fn test_depth_limit_stops_expansion() {
        let files = file_set(&[
            ("/a.js", "import b from './b'"),
            ("/b.js", "import c from './c'"),
            ("/c.js", "NEEDLE"),
        ]);
        let scanner = GraphScanner::new();

        let shallow = scanner.scan(&ScanRequest::new(files.clone(), "/a.js", "NEEDLE").with_max_depth(1));
        assert!(!shallow.found);
        assert_eq!(shallow.scanned_files, vec!["/a.js", "/b.js"]);

        let deep = scanner.scan(&ScanRequest::new(files, "/a.js", "NEEDLE").with_max_depth(2));
        assert_eq!(deep.import_path, vec!["/a.js", "/b.js", "/c.js"]);
    }

    #[test]
    fn test_strict_paths_drop_escaping_imports() {
        let files = file_set(&[
            ("/src/App.js", "import x from '../../x'"),
            ("/x.js", "NEEDLE"),
        ]);
        let request = ScanRequest::new(files, "/src/App.js", "NEEDLE");

        let lenient = GraphScanner::new().scan(&request);
        assert!(lenient.found);

        let strict = GraphScanner::with_config(ScannerConfig {
            strict_paths: true,
            ..ScannerConfig::default()
        })
        .scan(&request);
        assert!(!strict.found);
        assert_eq!(strict.scanned_files, vec!["/src/App.js"]);
    }

    #[test]
    fn test_observer_sees_traversal_without_changing_result() {
        let files = file_set(&[
            ("/App.js", "import Foo from './Foo';\nimport Nope from './Nope';"),
            ("/Foo.js", "nothing here"),
        ]);
        let request = ScanRequest::new(files, "/App.js", "NEEDLE");
        let scanner = GraphScanner::new();

        let mut recorder = Recorder::default();
        let observed = scanner.scan_with(&request, &mut recorder);

        assert_eq!(observed, scanner.scan(&request));
        assert_eq!(
            recorder.events,
            vec![
                "start /App.js 5",
                "visit /App.js 0",
                "unresolved /App.js ./Nope",
                "visit /Foo.js 1",
                "finish false",
            ]
        );
    }

    #[test]
    fn test_import_edges_report_resolution() {
        let files = file_set(&[
            ("/src/App.tsx", "import Button from './Button';\nimport api from '../api';"),
            ("/src/Button.tsx", ""),
        ]);
        let edges = GraphScanner::new().import_edges(&files, "/src/App.tsx").unwrap();

        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].resolved.as_deref(), Some("/src/Button.tsx"));
        assert_eq!(edges[1].candidate.as_deref(), Some("/api"));
        assert_eq!(edges[1].resolved, None);
        assert!(GraphScanner::new().import_edges(&files, "/missing.js").is_none());
    }

    #[test]
    fn test_opaque_files_are_searched_but_not_followed() {
        let files = file_set(&[
            ("/App.js", "import Data from './data'"),
            ("/data.js", r#"{"code":"import Foo from './Foo'"}"#),
            ("/Foo.js", "process.env.X"),
        ]);
        let opaque: BTreeSet<String> = ["/data.js".to_string()].into_iter().collect();
        let request = ScanRequest::new(files.clone(), "/App.js", "process.")
            .with_opaque_files(opaque.clone());

        let result = GraphScanner::new().scan(&request);
        assert!(!result.found);
        assert_eq!(result.scanned_files, vec!["/App.js", "/data.js"]);

        let hit = ScanRequest::new(files.clone(), "/App.js", "import Foo")
            .with_opaque_files(opaque.clone());
        assert_eq!(
            GraphScanner::new().scan(&hit).filename.as_deref(),
            Some("/data.js")
        );

        let snapshot = FileSnapshot { files, opaque };
        assert_eq!(
            GraphScanner::new().snapshot_import_edges(&snapshot, "/data.js"),
            Some(Vec::new())
        );
    }
}
