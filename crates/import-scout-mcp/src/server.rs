//! MCP server implementation using rmcp over stdio.

use std::sync::Arc;

use anyhow::Result;
use import_scout_core::{FileSnapshot, GraphScanner};
use import_scout_ops::{FileSource, OpsContext};
use rmcp::model::{
    AnnotateAble, CallToolRequestParam, CallToolResult, Content, ErrorData, Implementation,
    ListResourcesResult, ListToolsResult, PaginatedRequestParam, RawResource,
    ReadResourceRequestParam, ReadResourceResult, Resource, ResourceContents, ResourcesCapability,
    ServerCapabilities, ServerInfo, SubscribeRequestParam, Tool, ToolsCapability,
    UnsubscribeRequestParam,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ServerHandler, ServiceExt};
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::io::{stdin, stdout};
use tracing::info;

use crate::tools::ToolExecutor;
use crate::types::*;

const FILES_URI: &str = "scout://files";

/// Import-Scout MCP Server.
///
/// Serves one loaded project; `find_file_with_pattern` may also be given
/// an inline file set.
#[derive(Clone)]
pub struct ImportScoutMcp {
    executor: Arc<ToolExecutor>,
}

/// Convert a schemars schema to the Arc<Map<String, Value>> format required by rmcp.
fn schema_to_input_schema<T: schemars::JsonSchema>() -> Arc<Map<String, Value>> {
    let schema = schemars::schema_for!(T);
    let value = serde_json::to_value(&schema).unwrap_or(Value::Object(Map::new()));
    match value {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(Map::new()),
    }
}

fn json_result<T: Serialize>(output: &T) -> CallToolResult {
    let text = serde_json::to_string_pretty(output).unwrap_or_default();
    CallToolResult::success(vec![Content::text(text)])
}

fn invalid_input(err: serde_json::Error) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("Invalid input: {}", err))])
}

impl ImportScoutMcp {
    /// Create a server over an already loaded snapshot.
    pub fn new(snapshot: FileSnapshot, scanner: GraphScanner, default_max_depth: usize) -> Self {
        Self {
            executor: Arc::new(ToolExecutor::new(
                Arc::new(snapshot),
                scanner,
                default_max_depth,
            )),
        }
    }

    /// Load `source` through the ops layer and serve it.
    pub async fn load(ctx: &OpsContext, source: &FileSource) -> Result<Self> {
        let snapshot = ctx.load_files(source).await?;
        info!(
            source = %source.path().display(),
            files = snapshot.len(),
            "Loaded project for MCP"
        );
        Ok(Self::new(snapshot, ctx.scanner(), ctx.config.default_max_depth))
    }

    /// Number of files being served.
    pub fn file_count(&self) -> usize {
        self.executor.snapshot.len()
    }

    /// Run the server over stdio transport.
    pub async fn run_stdio(self) -> Result<()> {
        let transport = (stdin(), stdout());
        let server = self.serve(transport).await?;
        server.waiting().await?;
        Ok(())
    }

    /// Get the list of available tools.
    fn tools() -> Vec<Tool> {
        vec![
            Tool {
                name: "find_file_with_pattern".into(),
                description: Some(
                    "Breadth-first search over the relative import graph from startFile. Returns the first reachable file whose text contains searchPattern, the files scanned, and the import chain leading to the match."
                        .into(),
                ),
                input_schema: schema_to_input_schema::<FindFileInput>(),
                annotations: None,
                icons: None,
                meta: None,
                output_schema: None,
                title: None,
            },
            Tool {
                name: "list_imports".into(),
                description: Some(
                    "List the relative imports of a file and the project file each one resolves to."
                        .into(),
                ),
                input_schema: schema_to_input_schema::<ListImportsInput>(),
                annotations: None,
                icons: None,
                meta: None,
                output_schema: None,
                title: None,
            },
            Tool {
                name: "list_files".into(),
                description: Some(
                    "List files in the loaded project with optional filtering by path prefix or extension."
                        .into(),
                ),
                input_schema: schema_to_input_schema::<ListFilesInput>(),
                annotations: None,
                icons: None,
                meta: None,
                output_schema: None,
                title: None,
            },
        ]
    }

    /// Get the list of available resources.
    fn resources() -> Vec<Resource> {
        let mut r = RawResource::new(FILES_URI, "files");
        r.title = Some("Project Files".into());
        r.description = Some("Every file path in the loaded project with its size.".into());
        r.mime_type = Some("application/json".into());
        vec![r.no_annotation()]
    }

    /// Handle a resource read request.
    fn handle_resource(&self, uri: &str) -> Result<Vec<ResourceContents>, ErrorData> {
        match uri {
            FILES_URI => {
                let listing = self.executor.list_files(ListFilesInput {
                    path: None,
                    extension: None,
                    limit: usize::MAX,
                });
                let json = serde_json::to_string_pretty(&listing).map_err(|e| {
                    ErrorData::internal_error(format!("Serialization error: {}", e), None)
                })?;
                Ok(vec![ResourceContents::text(json, uri)])
            }
            _ => Err(ErrorData::invalid_params(
                format!("Unknown resource: {}", uri),
                None,
            )),
        }
    }

    /// Handle a tool call.
    fn handle_tool(&self, name: &str, args: Option<Map<String, Value>>) -> CallToolResult {
        let args = args.map(Value::Object).unwrap_or(serde_json::json!({}));

        match name {
            "find_file_with_pattern" => {
                let result = self.executor.find_file_with_pattern(&args);
                if result.error.is_some() {
                    let text = serde_json::to_string_pretty(&result).unwrap_or_default();
                    CallToolResult::error(vec![Content::text(text)])
                } else {
                    json_result(&result)
                }
            }
            "list_imports" => match serde_json::from_value::<ListImportsInput>(args) {
                Ok(input) => {
                    let file = input.file.clone();
                    match self.executor.list_imports(input) {
                        Some(output) => json_result(&output),
                        None => CallToolResult::error(vec![Content::text(format!(
                            "File not found: {}",
                            file
                        ))]),
                    }
                }
                Err(e) => invalid_input(e),
            },
            "list_files" => match serde_json::from_value::<ListFilesInput>(args) {
                Ok(input) => json_result(&self.executor.list_files(input)),
                Err(e) => invalid_input(e),
            },
            _ => CallToolResult::error(vec![Content::text(format!("Unknown tool: {}", name))]),
        }
    }
}

impl ServerHandler for ImportScoutMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: None }),
                resources: Some(ResourcesCapability {
                    subscribe: Some(false),
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "import-scout".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: Some("Import-Scout".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Import-Scout follows relative imports of a JavaScript/TypeScript project from an \
                 entry file to find where a piece of text lives. Tools: find_file_with_pattern, \
                 list_imports, list_files. Resources: scout://files."
                    .into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: Self::tools(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(self.handle_tool(&request.name, request.arguments))
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult {
            resources: Self::resources(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        let contents = self.handle_resource(&request.uri)?;
        Ok(ReadResourceResult { contents })
    }

    // Subscriptions are advertised as unsupported; accept them as no-ops.
    async fn subscribe(
        &self,
        _request: SubscribeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<(), ErrorData> {
        Ok(())
    }

    async fn unsubscribe(
        &self,
        _request: UnsubscribeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<(), ErrorData> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use import_scout_core::{ScanResult, VirtualFileSet};

    fn server() -> ImportScoutMcp {
        let mut files = VirtualFileSet::new();
        files.insert("/App.js".into(), "import Foo from './Foo'".into());
        files.insert("/Foo.js".into(), "process.env.X".into());
        ImportScoutMcp::new(FileSnapshot::new(files), GraphScanner::new(), 5)
    }

    fn scan_result(result: &CallToolResult) -> ScanResult {
        let text = result.content[0].as_text().unwrap().text.clone();
        serde_json::from_str(&text).unwrap()
    }

    fn args(value: Value) -> Option<Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    #[test]
    fn test_tools_have_object_schemas() {
        let tools = ImportScoutMcp::tools();
        let names: Vec<&str> = tools.iter().map(|t| &*t.name).collect();
        assert_eq!(names, vec!["find_file_with_pattern", "list_imports", "list_files"]);
        for tool in &tools {
            assert_eq!(tool.input_schema.get("type"), Some(&Value::from("object")));
        }
    }

    #[test]
    fn test_call_find_tool() {
        let result = server().handle_tool(
            "find_file_with_pattern",
            args(serde_json::json!({ "startFile": "/App.js", "searchPattern": "process." })),
        );
        assert_ne!(result.is_error, Some(true));

        let result = server().handle_tool(
            "find_file_with_pattern",
            args(serde_json::json!({ "startFile": "/Missing.js", "searchPattern": "x" })),
        );
        assert_eq!(result.is_error, Some(true));
        let body = scan_result(&result);
        assert!(!body.found);
        assert!(body.scanned_files.is_empty());
        assert_eq!(body.error.as_deref(), Some("Start file not found: /Missing.js"));
    }

    #[test]
    fn test_call_find_tool_with_inline_files() {
        let result = server().handle_tool(
            "find_file_with_pattern",
            args(serde_json::json!({
                "currentFiles": {
                    "/Main.js": "import cfg from './cfg'",
                    "/cfg.js": null,
                },
                "startFile": "/Main.js",
                "searchPattern": "process.",
            })),
        );
        assert_ne!(result.is_error, Some(true));
        let body = scan_result(&result);
        assert!(!body.found);
        assert_eq!(body.scanned_files, vec!["/Main.js", "/cfg.js"]);

        let result = server().handle_tool(
            "find_file_with_pattern",
            args(serde_json::json!({
                "files": "oops",
                "startFile": "/App.js",
                "searchPattern": "x",
            })),
        );
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            scan_result(&result).error.as_deref(),
            Some("Invalid currentFiles object")
        );
    }

    #[test]
    fn test_call_tool_rejects_bad_input() {
        let result = server().handle_tool("list_imports", args(serde_json::json!({})));
        assert_eq!(result.is_error, Some(true));

        let result = server().handle_tool("no_such_tool", None);
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_files_resource() {
        let server = server();
        assert_eq!(server.file_count(), 2);
        assert!(server.handle_resource(FILES_URI).is_ok());
        assert!(server.handle_resource("scout://nope").is_err());
    }
}
