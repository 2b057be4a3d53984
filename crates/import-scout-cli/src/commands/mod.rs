//! CLI command implementations.

pub mod config;
pub mod find;
pub mod graph;
pub mod imports;
pub mod mcp;
pub mod scan;
