//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit. `code()` gives a
//! stable string scripts can match on.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::store::StoreError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Config file missing, malformed or rejected
    #[error("{0}")]
    Config(String),

    /// `init` found a sheet already in place
    #[error("client sheet already exists at {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Runtime or listener failure in `serve`
    #[error("{0}")]
    Boot(String),

    /// Writing the JSON report to stdout failed
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CliError {
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "CLIENTSHEET_CONFIG_ERROR",
            CliError::AlreadyInitialized(_) => "CLIENTSHEET_ALREADY_INITIALIZED",
            CliError::Store(_) => "CLIENTSHEET_STORE_FAILED",
            CliError::Boot(_) => "CLIENTSHEET_BOOT_FAILED",
            CliError::Output(_) | CliError::Encode(_) => "CLIENTSHEET_IO_ERROR",
        }
    }
}
