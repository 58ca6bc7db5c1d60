//! CLI command implementations

use std::path::Path;

use serde_json::json;
use tracing::{info, warn};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::write_json;
use crate::http_server::HttpServer;
use crate::query::ClientQuery;
use crate::store::ClientStore;
use crate::validation::ClientValidator;

/// Main CLI entry point
///
/// Parses arguments, sets up logging and dispatches to the command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    init_tracing();
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
        Command::Validate {
            config,
            only_errors,
        } => validate(&config, only_errors),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default "info")
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build the query layer described by `config`
fn build_query(config: &Config) -> ClientQuery {
    ClientQuery::new(
        ClientStore::new(config.store.clone()),
        ClientValidator::new(config.validation.clone()),
    )
}

/// Create a header-only client sheet.
///
/// Fails if the sheet already exists so an existing dataset is never
/// replaced.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let store = ClientStore::new(config.store);

    if !store.initialize()? {
        return Err(CliError::AlreadyInitialized(store.path().to_path_buf()));
    }

    write_json(&json!({
        "initialized": true,
        "path": store.path().display().to_string(),
        "sheet": store.sheet_name(),
    }))
}

/// Start the HTTP API and serve until the process is stopped.
///
/// A missing sheet is created when `store.create_if_missing` is set;
/// otherwise the server still starts and every request fails with a
/// storage error until the file appears.
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let query = build_query(&config);
    let store = query.store();

    if !store.exists() {
        if config.store.create_if_missing {
            store.initialize()?;
        } else {
            warn!(path = %store.path().display(), "client sheet not found");
        }
    }

    info!(
        path = %store.path().display(),
        regions = config.validation.phone_regions.len(),
        domains = config.validation.known_email_domains.len(),
        "starting client API"
    );

    let server = HttpServer::with_config(config.http.clone(), query);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Boot(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::Boot(format!("HTTP server failed: {}", e)))
    })
}

/// Print the validation-annotated client list.
pub fn validate(config_path: &Path, only_errors: bool) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let query = build_query(&config);

    let clients = if only_errors {
        query.list_only_with_errors()?
    } else {
        query.list_annotated()?
    };

    write_json(&clients)
}
