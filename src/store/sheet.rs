//! In-memory image of the client sheet
//!
//! A `Sheet` is one named worksheet as rows of cells. It is loaded fresh for
//! every store operation and written back in one piece. Other worksheets of
//! the same workbook ride along untouched so a save never loses them.
//!
//! Rows may differ in length. Reads keep short rows, and in-place edits
//! leave them alone; rebuilding the sheet from parsed clients does not.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use super::codec::{self, SheetFormat, Worksheet};
use super::errors::{StoreError, StoreResult};

/// Column headers written as row 1
pub const HEADER: [&str; 4] = ["Key", "ContactName", "Email", "ContactPhone"];

/// The client worksheet, header included
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<String>>,
    /// Remaining worksheets of the workbook
    others: Vec<Worksheet>,
    /// Index of this worksheet among all of them
    position: usize,
}

impl Sheet {
    /// A worksheet called `name` containing only the header row
    pub fn with_header(name: impl Into<String>) -> Self {
        let mut sheet = Self {
            name: name.into(),
            ..Self::default()
        };
        sheet.push_row(HEADER);
        sheet
    }

    /// Load worksheet `name` from `path`.
    ///
    /// A CSV file has a single sheet, which is returned whatever `name` is.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the file cannot be opened or parsed,
    /// or if the workbook has no worksheet called `name`.
    pub fn read(path: &Path, name: &str) -> StoreResult<Self> {
        match SheetFormat::for_path(path) {
            SheetFormat::Csv => Ok(Self {
                name: name.to_string(),
                rows: codec::read_csv(path)?,
                ..Self::default()
            }),
            SheetFormat::Xlsx => {
                let mut sheets = codec::read_xlsx(path)?;
                let position = sheets
                    .iter()
                    .position(|sheet| sheet.name == name)
                    .ok_or_else(|| {
                        StoreError::Storage(format!(
                            "Sheet {} not found in {}",
                            name,
                            path.display()
                        ))
                    })?;
                let target = sheets.remove(position);
                Ok(Self {
                    name: target.name,
                    rows: target.rows,
                    others: sheets,
                    position,
                })
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows, header included
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every row, header included
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Rows after the header, with their 0-based sheet index
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &Vec<String>)> {
        self.rows.iter().enumerate().skip(1)
    }

    /// Append a row after the current last row
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Drop every row and start over from the header
    pub fn reset_to_header(&mut self) {
        self.rows.clear();
        self.push_row(HEADER);
    }

    /// Overwrite the leading cells of row `index`, extending it if needed.
    ///
    /// Cells past the overwritten ones are left untouched.
    pub fn overwrite_row(&mut self, index: usize, cells: &[&str]) -> StoreResult<()> {
        let row = self.rows.get_mut(index).ok_or_else(|| {
            StoreError::Storage(format!("Row {} is outside sheet {}", index + 1, self.name))
        })?;
        if row.len() < cells.len() {
            row.resize(cells.len(), String::new());
        }
        for (slot, value) in row.iter_mut().zip(cells) {
            *slot = (*value).to_string();
        }
        Ok(())
    }

    /// Index of the first data row whose first cell equals `key`
    pub fn find_row(&self, key: &str) -> Option<usize> {
        self.data_rows()
            .find(|(_, row)| row.first().map(String::as_str) == Some(key))
            .map(|(index, _)| index)
    }

    fn encode(&self, format: SheetFormat) -> StoreResult<Vec<u8>> {
        match format {
            SheetFormat::Csv => codec::write_csv(&self.rows),
            SheetFormat::Xlsx => {
                let mut sheets = self.others.clone();
                let at = self.position.min(sheets.len());
                sheets.insert(
                    at,
                    Worksheet {
                        name: self.name.clone(),
                        rows: self.rows.clone(),
                    },
                );
                codec::write_xlsx(&sheets)
            }
        }
    }

    /// Write the whole sheet to `path`, replacing any previous file.
    ///
    /// Each save writes its own temp file next to `path`, fsyncs it and
    /// renames it over `path`. If any step fails the previous file is left
    /// as it was. Concurrent saves do not interfere; the last rename wins.
    pub fn save(&self, path: &Path) -> StoreResult<()> {
        let bytes = self.encode(SheetFormat::for_path(path))?;
        write_atomic(path, &bytes)
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| {
        StoreError::storage(format!("Failed to create temp file in {}", dir.display()), e)
    })?;

    if let Ok(meta) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| {
                StoreError::storage(format!("Failed to copy permissions of {}", path.display()), e)
            })?;
    }

    temp.write_all(bytes)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| StoreError::storage(format!("Failed to write sheet {}", path.display()), e))?;

    // the temp file is removed on drop if persist fails
    temp.persist(path).map_err(|e| {
        StoreError::storage(format!("Failed to save sheet {}", path.display()), e.error)
    })?;

    // fsync the directory so the rename itself is durable
    if let Ok(dir) = File::open(dir) {
        let _ = dir.sync_all();
    }

    Ok(())
}
