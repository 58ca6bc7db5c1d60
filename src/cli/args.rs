//! CLI argument definitions using clap
//!
//! Commands:
//! - clientsheet init --config <path>
//! - clientsheet serve --config <path> [--port <port>]
//! - clientsheet validate --config <path> [--only-errors]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// clientsheet - client records in a spreadsheet, served over HTTP
#[derive(Parser, Debug)]
#[command(name = "clientsheet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty client sheet with its header row
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./clientsheet.json")]
        config: PathBuf,
    },

    /// Start the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./clientsheet.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print every client with its validation result as JSON
    Validate {
        /// Path to configuration file
        #[arg(long, default_value = "./clientsheet.json")]
        config: PathBuf,

        /// Only print clients that fail at least one rule
        #[arg(long)]
        only_errors: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
