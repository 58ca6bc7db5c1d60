//! On-disk sheet formats
//!
//! `.csv` files hold exactly one unnamed sheet. Anything else is treated as
//! an xlsx workbook: read with calamine, written with rust_xlsxwriter.

use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use rust_xlsxwriter::Workbook;

use super::errors::{StoreError, StoreResult};

/// File format, picked from the path's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Xlsx,
    Csv,
}

impl SheetFormat {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => SheetFormat::Csv,
            _ => SheetFormat::Xlsx,
        }
    }
}

/// One named worksheet of a workbook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Worksheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

// ==================== xlsx ====================

/// Every worksheet of the workbook at `path`, in workbook order.
///
/// Cell values come back as text. Trailing empty cells are dropped from each
/// row, so a partly filled row reads as a short row.
pub fn read_xlsx(path: &Path) -> StoreResult<Vec<Worksheet>> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
        StoreError::storage(format!("Failed to open workbook {}", path.display()), e)
    })?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name).map_err(|e| {
            StoreError::storage(
                format!("Failed to read sheet {} in {}", name, path.display()),
                e,
            )
        })?;
        sheets.push(Worksheet {
            rows: rows_of(&range),
            name,
        });
    }

    Ok(sheets)
}

/// Encode `sheets` as an xlsx workbook. Every cell is written as a string.
pub fn write_xlsx(sheets: &[Worksheet]) -> StoreResult<Vec<u8>> {
    let mut workbook = Workbook::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name).map_err(|e| {
            StoreError::storage(format!("Invalid sheet name {:?}", sheet.name), e)
        })?;

        for (row_index, row) in sheet.rows.iter().enumerate() {
            let row_num = u32::try_from(row_index)
                .map_err(|e| StoreError::storage("Sheet has too many rows", e))?;

            for (col_index, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                let col_num = u16::try_from(col_index)
                    .map_err(|e| StoreError::storage("Sheet row has too many cells", e))?;
                worksheet
                    .write_string(row_num, col_num, value.as_str())
                    .map_err(|e| {
                        StoreError::storage(format!("Failed to write sheet {}", sheet.name), e)
                    })?;
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| StoreError::storage("Failed to encode workbook", e))
}

/// Rows of `range` anchored at A1
fn rows_of(range: &Range<Data>) -> Vec<Vec<String>> {
    let Some((first_row, first_col)) = range.start() else {
        return Vec::new();
    };

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); first_row as usize];
    for cells in range.rows() {
        let mut row = vec![String::new(); first_col as usize];
        row.extend(cells.iter().map(cell_text));
        while row.last().is_some_and(String::is_empty) {
            row.pop();
        }
        rows.push(row);
    }
    rows
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        // keys and phones typed as numbers arrive as whole floats
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        other => other.to_string(),
    }
}

// ==================== csv ====================

/// All rows of the CSV file at `path`; rows may differ in length
pub fn read_csv(path: &Path) -> StoreResult<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| StoreError::storage(format!("Failed to open sheet {}", path.display()), e))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| {
            StoreError::storage(format!("Failed to parse sheet {}", path.display()), e)
        })?;
        rows.push(record.iter().map(String::from).collect());
    }

    Ok(rows)
}

pub fn write_csv(rows: &[Vec<String>]) -> StoreResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| StoreError::storage("Failed to encode sheet row", e))?;
    }

    writer
        .into_inner()
        .map_err(|e| StoreError::storage("Failed to encode sheet", e))
}
