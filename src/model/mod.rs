//! Record model for clientsheet
//!
//! The `Client` is the only persisted entity. `ErrorRecord` and
//! `AnnotatedClient` are validation output and are computed on every read.

mod client;

pub use client::{AnnotatedClient, Client, ErrorRecord};
