//! MCP (Model Context Protocol) server for Import-Scout.
//!
//! Exposes the import-graph scanner as MCP tools over stdio, so an agent can
//! ask which file reachable from an entry point contains some text.
//!
//! ```rust,no_run
//! use import_scout_mcp::ImportScoutMcp;
//! use import_scout_ops::{Config, FileSource, OpsContext};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let ctx = OpsContext::new(Config::load()?);
//!     let server = ImportScoutMcp::load(&ctx, &FileSource::detect(".")).await?;
//!     server.run_stdio().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Tools
//!
//! - `find_file_with_pattern` - Follow imports from an entry file to the first file containing a pattern
//! - `list_imports` - Relative imports of a file and what they resolve to
//! - `list_files` - List loaded files with filters

mod server;
mod tools;
mod types;

pub use server::ImportScoutMcp;
pub use types::*;
