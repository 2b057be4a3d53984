//! Import-Scout Operations Layer
//!
//! Typed operations on top of [`import_scout_core`]: load a project from a
//! directory or a JSON snapshot, then find, list imports, or build the import
//! graph. Both the CLI and the MCP server go through this crate.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use import_scout_ops::{Config, FindRequest, OpsContext};
//!
//! #[tokio::main]
//! async fn main() -> import_scout_ops::OpsResult<()> {
//!     let ctx = OpsContext::new(Config::load()?);
//!
//!     let request = FindRequest::new("./web", "/src/App.js", "process.env");
//!     let response = ctx.find(request).await?;
//!
//!     println!("{:?}", response.result.import_path);
//!     Ok(())
//! }
//! ```

mod config;
mod context;
mod error;
mod requests;
mod responses;
mod source;

// Re-export public API
pub use config::{Config, CONFIG_PATH_ENV};
pub use context::OpsContext;
pub use error::{OpsError, OpsResult};
pub use requests::*;
pub use responses::*;
pub use source::{load_directory, load_snapshot, FileSource};
