//! clientsheet - client records kept in a single spreadsheet file
//!
//! Layers, leaves first:
//!
//! - `model`: the `Client` record and validation annotations
//! - `validation`: pure field rules with injected allowlists
//! - `store`: list/find/create/update/delete over the sheet file
//! - `query`: search and validation-annotated views
//! - `http_server`: axum boundary mapping store failures to statuses
//! - `cli`: init/serve/validate commands over a JSON config

pub mod cli;
pub mod http_server;
pub mod model;
pub mod query;
pub mod store;
pub mod validation;
