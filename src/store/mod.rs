//! Spreadsheet-backed client store
//!
//! The store keeps every client in one worksheet of an xlsx workbook (or a
//! CSV file): a header row followed by one row per client, columns strictly
//! positional.
//!
//! # Design Principles
//!
//! - No cache: every operation re-reads the whole file
//! - Create and update touch one row in place, then save the whole sheet
//! - Delete rebuilds the sheet from the remaining records
//! - Saves go through a per-save temp file and rename, so a failed save
//!   never leaves a partial file behind
//! - Other worksheets of the workbook are carried through every save
//! - Key uniqueness is checked here by linear scan; the file itself does
//!   not enforce it

mod client_store;
mod codec;
mod config;
mod errors;
mod sheet;

pub use client_store::ClientStore;
pub use codec::SheetFormat;
pub use config::StoreConfig;
pub use errors::{StoreError, StoreResult};
pub use sheet::{Sheet, HEADER};
