//! Validation error type

use thiserror::Error;

use crate::model::ErrorRecord;

/// A client failed one or more field rules.
///
/// Carries the full per-field list rather than a single message so the
/// boundary can return it as structured data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", summary(.errors))]
pub struct ValidationError {
    pub errors: Vec<ErrorRecord>,
}

impl ValidationError {
    pub fn new(errors: Vec<ErrorRecord>) -> Self {
        Self { errors }
    }

    /// Names of the fields that failed, in validation order
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }
}

fn summary(errors: &[ErrorRecord]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}
