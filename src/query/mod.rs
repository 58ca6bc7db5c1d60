//! Query and aggregation over the client store
//!
//! Search and the validation-annotated views. Everything here is computed
//! from a fresh `list_all()`; nothing is cached.

mod clients;

pub use clients::{matches_term, ClientQuery};
