//! Client store over the sheet file

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use super::config::StoreConfig;
use super::errors::{StoreError, StoreResult};
use super::sheet::{Sheet, HEADER};
use crate::model::Client;

/// List/find/create/update/delete of clients backed by one worksheet.
///
/// Holds no data between calls. Two stores pointed at the same path see each
/// other's writes on their next operation; concurrent writers race and the
/// last save wins.
#[derive(Debug, Clone)]
pub struct ClientStore {
    config: StoreConfig,
}

impl ClientStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Store over `path` with default settings
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::new(StoreConfig::with_path(path.as_ref()))
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Worksheet holding the clients
    pub fn sheet_name(&self) -> &str {
        &self.config.sheet_name
    }

    fn read_sheet(&self) -> StoreResult<Sheet> {
        Sheet::read(self.path(), self.sheet_name())
    }

    /// Whether the sheet file is present
    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Create a header-only sheet if the file does not exist yet.
    ///
    /// Returns `true` when a file was created. An existing file is never
    /// touched.
    pub fn initialize(&self) -> StoreResult<bool> {
        if self.exists() {
            return Ok(false);
        }

        if let Some(parent) = self.path().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    StoreError::storage(
                        format!("Failed to create directory {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        Sheet::with_header(self.sheet_name()).save(self.path())?;
        info!(path = %self.path().display(), "created empty client sheet");
        Ok(true)
    }

    /// Every client in sheet order.
    ///
    /// The header row is skipped, as is any row with fewer than four columns.
    pub fn list_all(&self) -> StoreResult<Vec<Client>> {
        Ok(clients_in(&self.read_sheet()?))
    }

    /// First client whose key equals `key`, if any
    pub fn find_by_key(&self, key: &str) -> StoreResult<Option<Client>> {
        Ok(self.list_all()?.into_iter().find(|c| c.key == key))
    }

    /// Append a new client as the last row.
    ///
    /// # Errors
    ///
    /// - `StoreError::Conflict` if a client with the same key exists; the
    ///   file is left unchanged
    /// - `StoreError::Storage` if the sheet cannot be read or saved
    pub fn create(&self, client: &Client) -> StoreResult<()> {
        let mut sheet = self.read_sheet()?;

        if clients_in(&sheet).iter().any(|c| c.key == client.key) {
            warn!(key = %client.key, "create rejected: key already exists");
            return Err(StoreError::Conflict(client.key.clone()));
        }

        // An empty file still gets the header as row 1
        if sheet.is_empty() {
            sheet.push_row(HEADER);
        }

        sheet.push_row(client.to_row());
        sheet.save(self.path())?;

        info!(key = %client.key, row = sheet.len(), "client created");
        Ok(())
    }

    /// Overwrite the client stored under `key` with `client`.
    ///
    /// `client.key` may differ from `key`, which renames the record in place.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if no client has `key`
    /// - `StoreError::Conflict` if renaming onto a key another client holds
    /// - `StoreError::Storage` if the sheet cannot be read or saved
    pub fn update(&self, key: &str, client: &Client) -> StoreResult<()> {
        let mut sheet = self.read_sheet()?;
        let existing = clients_in(&sheet);

        if !existing.iter().any(|c| c.key == key) {
            return Err(StoreError::NotFound(key.to_string()));
        }

        if client.key != key && existing.iter().any(|c| c.key == client.key) {
            warn!(key, new_key = %client.key, "update rejected: new key already exists");
            return Err(StoreError::Conflict(client.key.clone()));
        }

        let row = sheet
            .find_row(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        sheet.overwrite_row(row, &client.to_row())?;
        sheet.save(self.path())?;

        info!(key, new_key = %client.key, row = row + 1, "client updated");
        Ok(())
    }

    /// Remove every client with `key` and rewrite the sheet.
    ///
    /// The worksheet is rebuilt from scratch: header, then the remaining
    /// clients in their original order. Short rows are not carried over.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if no client has `key`
    /// - `StoreError::Storage` if the sheet cannot be read or saved
    pub fn delete(&self, key: &str) -> StoreResult<()> {
        let mut sheet = self.read_sheet()?;
        let clients = clients_in(&sheet);
        let before = clients.len();

        let remaining: Vec<Client> = clients.into_iter().filter(|c| c.key != key).collect();
        if remaining.len() == before {
            return Err(StoreError::NotFound(key.to_string()));
        }

        sheet.reset_to_header();
        for client in &remaining {
            sheet.push_row(client.to_row());
        }
        sheet.save(self.path())?;

        info!(key, removed = before - remaining.len(), remaining = remaining.len(), "client deleted");
        Ok(())
    }
}

fn clients_in(sheet: &Sheet) -> Vec<Client> {
    sheet
        .data_rows()
        .filter_map(|(index, row)| {
            let client = Client::from_row(row);
            if client.is_none() {
                debug!(row = index + 1, columns = row.len(), "skipping short row");
            }
            client
        })
        .collect()
}
