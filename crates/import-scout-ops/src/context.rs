//! OpsContext - the service that executes scan operations.
//!
//! Loading the project and scanning it are blocking work, so both run on
//! tokio's blocking pool; an optional deadline from the config bounds them.

use std::future::Future;
use std::time::Duration;

use import_scout_core::{FileSnapshot, GraphScanner, ImportGraph, ScanRequest, TracingObserver};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{OpsError, OpsResult};
use crate::requests::*;
use crate::responses::*;
use crate::source::FileSource;

/// The main operations context.
///
/// Cheap to clone and safe to share across tasks.
#[derive(Debug, Clone)]
pub struct OpsContext {
    /// Configuration for operations.
    pub config: Config,
}

impl OpsContext {
    /// Create a new OpsContext with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Create a new OpsContext from the on-disk configuration.
    pub fn default_config() -> OpsResult<Self> {
        Ok(Self::new(Config::load()?))
    }

    /// Scanner configured from [`Config`].
    pub fn scanner(&self) -> GraphScanner {
        GraphScanner::with_config(self.config.scanner_config())
    }

    fn max_depth(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.config.default_max_depth)
    }

    /// Run `fut` under the configured deadline, if any.
    async fn with_deadline<T, F>(&self, fut: F) -> OpsResult<T>
    where
        F: Future<Output = OpsResult<T>>,
    {
        match self.config.scan_timeout_ms {
            Some(timeout_ms) => tokio::time::timeout(Duration::from_millis(timeout_ms), fut)
                .await
                .map_err(|_| OpsError::Timeout { timeout_ms })?,
            None => fut.await,
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load the files described by `source`.
    pub async fn load_files(&self, source: &FileSource) -> OpsResult<FileSnapshot> {
        let source = source.clone();
        let config = self.config.clone();
        let files = tokio::task::spawn_blocking(move || source.load(&config)).await??;
        Ok(files)
    }

    // =========================================================================
    // Find
    // =========================================================================

    /// Find the first file reachable from the entry that contains the pattern.
    ///
    /// An unknown start file is not an error: it comes back inside
    /// [`FindResponse::result`].
    pub async fn find(&self, request: FindRequest) -> OpsResult<FindResponse> {
        let max_depth = self.max_depth(request.max_depth);
        self.with_deadline(async {
            let snapshot = self.load_files(&request.source).await?;
            let file_count = snapshot.len();
            let total_bytes = snapshot.total_bytes();
            let start_file = locate_key(&snapshot.files, &request.start_file);
            info!(
                source = %request.source.path().display(),
                files = file_count,
                start = %start_file,
                "Loaded project"
            );

            let scanner = self.scanner();
            let scan = ScanRequest::from_snapshot(snapshot, start_file, request.pattern.clone())
                .with_max_depth(max_depth);
            let result = tokio::task::spawn_blocking(move || {
                scanner.scan_with(&scan, &mut TracingObserver)
            })
            .await?;

            Ok(FindResponse {
                result,
                file_count,
                total_bytes,
                max_depth,
            })
        })
        .await
    }

    // =========================================================================
    // Imports
    // =========================================================================

    /// List the relative imports of one file and what each resolves to.
    pub async fn imports(&self, request: ImportsRequest) -> OpsResult<ImportsResponse> {
        self.with_deadline(async {
            let snapshot = self.load_files(&request.source).await?;
            let file = locate_key(&snapshot.files, &request.file);
            let imports = self
                .scanner()
                .snapshot_import_edges(&snapshot, &file)
                .ok_or_else(|| OpsError::FileNotFound { file: file.clone() })?;

            debug!(file = %file, count = imports.len(), "Listed imports");
            Ok(ImportsResponse { file, imports })
        })
        .await
    }

    // =========================================================================
    // Graph
    // =========================================================================

    /// Build the import graph reachable from the entry file.
    pub async fn graph(&self, request: GraphRequest) -> OpsResult<GraphResponse> {
        let max_depth = self.max_depth(request.max_depth);
        self.with_deadline(async {
            let snapshot = self.load_files(&request.source).await?;
            let scanner = self.scanner();
            let start_file = locate_key(&snapshot.files, &request.start_file);

            let root = start_file.clone();
            let graph = tokio::task::spawn_blocking(move || {
                ImportGraph::from_snapshot(&scanner, &snapshot, &root, max_depth)
            })
            .await?
            .ok_or_else(|| OpsError::FileNotFound {
                file: start_file.clone(),
            })?;

            info!(
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "Built import graph"
            );

            Ok(GraphResponse {
                start_file,
                nodes: graph.nodes(),
                edges: graph.edges(),
                dot: graph.to_dot(),
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn sample_project() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(
            root,
            "src/App.js",
            "import Header from './components/Header'\nimport api from './api/index'\n",
        );
        write(
            root,
            "src/components/Header.jsx",
            "import Logo from './Logo'\nexport default () => null\n",
        );
        write(root, "src/components/Logo.tsx", "export const url = process.env.LOGO_URL\n");
        write(root, "src/api/index.ts", "import cfg from '../missing'\n");
        temp
    }

    fn context() -> OpsContext {
        OpsContext::new(Config::default())
    }

    #[tokio::test]
    async fn test_find_through_directory() {
        let temp = sample_project();
        let response = context()
            .find(FindRequest::new(temp.path(), "src/App.js", "process.env"))
            .await
            .unwrap();

        assert!(response.result.found);
        assert_eq!(
            response.result.filename.as_deref(),
            Some("/src/components/Logo.tsx")
        );
        assert_eq!(
            response.result.import_path,
            vec![
                "/src/App.js",
                "/src/components/Header.jsx",
                "/src/components/Logo.tsx"
            ]
        );
        assert_eq!(response.file_count, 4);
        assert_eq!(response.max_depth, 5);
        assert!(!response.human_size().is_empty());
    }

    #[tokio::test]
    async fn test_find_accepts_unrooted_snapshot_keys() {
        let temp = TempDir::new().unwrap();
        let snapshot = temp.path().join("project.json");
        fs::write(
            &snapshot,
            r#"{ "src/App.js": "import Foo from './Foo'", "src/Foo.js": "NEEDLE" }"#,
        )
        .unwrap();

        let response = context()
            .find(FindRequest::new(&snapshot, "./src/App.js", "NEEDLE"))
            .await
            .unwrap();
        assert_eq!(response.result.import_path, vec!["src/App.js", "src/Foo.js"]);

        let response = context()
            .imports(ImportsRequest::new(&snapshot, "/src/App.js"))
            .await
            .unwrap();
        assert_eq!(response.file, "src/App.js");
        assert_eq!(response.imports[0].resolved.as_deref(), Some("src/Foo.js"));
    }

    #[tokio::test]
    async fn test_snapshot_non_string_entries_are_not_followed() {
        let temp = TempDir::new().unwrap();
        let snapshot = temp.path().join("project.json");
        fs::write(
            &snapshot,
            r#"{ "/App.js": { "code": "import Foo from './Foo'" }, "/Foo.js": "process.env.X" }"#,
        )
        .unwrap();

        let response = context()
            .find(FindRequest::new(&snapshot, "/App.js", "process."))
            .await
            .unwrap();
        assert!(!response.result.found);
        assert_eq!(response.result.scanned_files, vec!["/App.js"]);

        let imports = context()
            .imports(ImportsRequest::new(&snapshot, "/App.js"))
            .await
            .unwrap();
        assert!(imports.imports.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_reports_timeout() {
        let ctx = OpsContext::new(Config {
            scan_timeout_ms: Some(50),
            ..Config::default()
        });

        let err = ctx
            .with_deadline(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, OpsError::Timeout { timeout_ms: 50 }));

        let value = ctx.with_deadline(async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_deadline_without_timeout() {
        let value = context()
            .with_deadline(async {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok("done")
            })
            .await
            .unwrap();
        assert_eq!(value, "done");
    }

    #[tokio::test]
    async fn test_find_respects_max_depth() {
        let temp = sample_project();
        let response = context()
            .find(FindRequest::new(temp.path(), "src/App.js", "process.env").with_max_depth(1))
            .await
            .unwrap();

        assert!(!response.result.found);
        assert!(response.result.error.is_none());
    }

    #[tokio::test]
    async fn test_find_unknown_start_reports_in_result() {
        let temp = sample_project();
        let response = context()
            .find(FindRequest::new(temp.path(), "nope.js", "x"))
            .await
            .unwrap();

        assert_eq!(
            response.result.error.as_deref(),
            Some("Start file not found: /nope.js")
        );
    }

    #[tokio::test]
    async fn test_find_missing_source() {
        let temp = TempDir::new().unwrap();
        let err = context()
            .find(FindRequest::new(temp.path().join("gone"), "/a.js", "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, OpsError::SourceNotFound { .. }));
    }

    #[tokio::test]
    async fn test_find_from_snapshot() {
        let temp = TempDir::new().unwrap();
        let snapshot = temp.path().join("project.json");
        fs::write(
            &snapshot,
            r#"{ "/App.js": "import Foo from './Foo'", "/Foo.js": "process.env.X" }"#,
        )
        .unwrap();

        let response = context()
            .find(FindRequest::new(&snapshot, "/App.js", "process."))
            .await
            .unwrap();
        assert_eq!(response.result.import_path, vec!["/App.js", "/Foo.js"]);
    }

    #[tokio::test]
    async fn test_imports_lists_resolution() {
        let temp = sample_project();
        let response = context()
            .imports(ImportsRequest::new(temp.path(), "src/api/index.ts"))
            .await
            .unwrap();

        assert_eq!(response.imports.len(), 1);
        assert_eq!(response.imports[0].spec, "../missing");
        assert_eq!(response.unresolved().count(), 1);

        let err = context()
            .imports(ImportsRequest::new(temp.path(), "src/none.js"))
            .await
            .unwrap_err();
        assert!(matches!(err, OpsError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_graph_contains_reachable_files() {
        let temp = sample_project();
        let response = context()
            .graph(GraphRequest::new(temp.path(), "src/App.js"))
            .await
            .unwrap();

        let paths: Vec<&str> = response.nodes.iter().map(|n| n.path.as_str()).collect();
        assert!(paths.contains(&"/src/components/Logo.tsx"));
        assert!(paths.contains(&"/src/api/index.ts"));
        assert_eq!(response.unresolved_count(), 1);
        assert!(response.dot.starts_with("digraph"));
    }
}
