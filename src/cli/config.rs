//! Configuration file structure
//!
//! A single JSON document. Every section has defaults, so `{}` is a valid
//! config that serves sheet `Hoja1` of `./clients.xlsx` on port 8080 with the built-in rules.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::store::StoreConfig;
use crate::validation::ValidationRules;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Sheet location
    #[serde(default)]
    pub store: StoreConfig,

    /// Email allowlist and phone regions
    #[serde(default)]
    pub validation: ValidationRules,

    /// Bind address and CORS
    #[serde(default)]
    pub http: HttpServerConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::Config(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        self.store
            .check()
            .map_err(|e| CliError::Config(format!("store.{}", e)))?;

        if self.http.port == 0 {
            return Err(CliError::Config("http.port must be > 0".to_string()));
        }

        self.validation
            .check()
            .map_err(|e| CliError::Config(format!("validation: {}", e)))?;

        Ok(())
    }
}
