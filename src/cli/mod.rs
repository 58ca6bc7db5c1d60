//! CLI module for clientsheet
//!
//! Provides command-line interface for:
//! - init: Create the client sheet
//! - serve: Run the HTTP API
//! - validate: One-shot validation report

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve, validate};
pub use config::Config;
pub use errors::{CliError, CliResult};
pub use io::{write_json, write_json_to};
