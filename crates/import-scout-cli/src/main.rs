//! Import-Scout CLI - follow a JS/TS project's relative imports to find text.
//!
//! Every command takes a project path: a directory, or a `.json` snapshot
//! mapping file paths to source text.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use import_scout_ops::{Config, OpsContext};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;
mod config;

use commands::config as config_cmd;

/// Import-Scout CLI - find which imported file contains a pattern.
#[derive(Parser, Debug)]
#[command(
    name = "iscout",
    author,
    version,
    about = "Import-Scout: follow relative imports from an entry file to find text",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for the graph command.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphFormat {
    Dot,
    Json,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Find the first file reachable from an entry file that contains a pattern.
    Find {
        /// Project directory or `.json` snapshot.
        path: PathBuf,

        /// Entry file, relative to the project root (e.g. src/App.js).
        #[arg(short, long)]
        start: String,

        /// Literal text to search for.
        #[arg(short, long)]
        pattern: String,

        /// Maximum number of import hops (defaults to the configured value).
        #[arg(short = 'd', long, env = "ISCOUT_MAX_DEPTH")]
        max_depth: Option<usize>,

        /// Print the raw result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the relative imports of one file and what they resolve to.
    Imports {
        /// Project directory or `.json` snapshot.
        path: PathBuf,

        /// File to inspect, relative to the project root.
        file: String,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the import graph reachable from an entry file.
    Graph {
        /// Project directory or `.json` snapshot.
        path: PathBuf,

        /// Entry file, relative to the project root.
        #[arg(short, long)]
        start: String,

        /// Maximum number of import hops (defaults to the configured value).
        #[arg(short = 'd', long, env = "ISCOUT_MAX_DEPTH")]
        max_depth: Option<usize>,

        /// Output format.
        #[arg(short, long, value_enum, default_value = "dot")]
        format: GraphFormat,

        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a scan described by a JSON request (`-` reads stdin).
    ///
    /// The request is `{ "files" | "currentFiles": {...}, "startFile": "...",
    /// "searchPattern": "...", "maxDepth": 5 }`; the result is printed as JSON.
    Scan {
        /// Request file, or `-` for stdin.
        #[arg(default_value = "-")]
        request: PathBuf,
    },

    /// Serve a project over MCP (stdio transport).
    Mcp {
        /// Project directory or `.json` snapshot.
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Get a configuration value.
    Get {
        /// Configuration key.
        key: String,
    },

    /// Reset configuration to defaults.
    Reset,

    /// Show path to config file.
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN // Default to less noise
    };

    // Logs go to stderr: stdout carries results and the MCP transport.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = config::load()?;

    match cli.command {
        Commands::Find {
            path,
            start,
            pattern,
            max_depth,
            json,
        } => {
            let ctx = OpsContext::new(config);
            commands::find::execute(&ctx, &path, &start, &pattern, max_depth, json).await?;
        }

        Commands::Imports { path, file, json } => {
            let ctx = OpsContext::new(config);
            commands::imports::execute(&ctx, &path, &file, json).await?;
        }

        Commands::Graph {
            path,
            start,
            max_depth,
            format,
            output,
        } => {
            let ctx = OpsContext::new(config);
            commands::graph::execute(&ctx, &path, &start, max_depth, format, output).await?;
        }

        Commands::Scan { request } => {
            commands::scan::execute(&config, &request)?;
        }

        Commands::Mcp { path } => {
            let ctx = OpsContext::new(config);
            commands::mcp::execute(&ctx, &path).await?;
        }

        Commands::Config(config_cmd_inner) => {
            let mut config = config;
            match config_cmd_inner {
                ConfigCommands::Show => {
                    config_cmd::show(&config)?;
                }
                ConfigCommands::Set { key, value } => {
                    config_cmd::set(&mut config, &key, &value)?;
                }
                ConfigCommands::Get { key } => {
                    config_cmd::get(&config, &key)?;
                }
                ConfigCommands::Reset => {
                    config_cmd::reset()?;
                }
                ConfigCommands::Path => {
                    if let Some(path) = Config::config_file_path() {
                        println!("{}", path.display());
                    } else {
                        println!("(no config file path available)");
                    }
                }
            }
        }
    }

    Ok(())
}
