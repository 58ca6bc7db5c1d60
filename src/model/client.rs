//! Client record and its validation annotations

use serde::{Deserialize, Serialize};

/// A client row as stored in the spreadsheet.
///
/// Columns are positional: key, contact name, email, contact phone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Intended unique identifier (digits only per validation rules)
    pub key: String,
    /// Contact person name
    pub contact_name: String,
    /// Contact email address
    pub email: String,
    /// Contact phone, separators allowed
    pub contact_phone: String,
}

impl Client {
    /// Create a new client record
    pub fn new(
        key: impl Into<String>,
        contact_name: impl Into<String>,
        email: impl Into<String>,
        contact_phone: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            contact_name: contact_name.into(),
            email: email.into(),
            contact_phone: contact_phone.into(),
        }
    }

    /// Build a client from a spreadsheet row.
    ///
    /// Returns `None` when the row has fewer than four columns.
    /// Extra trailing columns are ignored.
    pub fn from_row(row: &[String]) -> Option<Self> {
        match row {
            [key, contact_name, email, contact_phone, ..] => Some(Self::new(
                key.as_str(),
                contact_name.as_str(),
                email.as_str(),
                contact_phone.as_str(),
            )),
            _ => None,
        }
    }

    /// The four stored columns in sheet order
    pub fn to_row(&self) -> [&str; 4] {
        [
            self.key.as_str(),
            self.contact_name.as_str(),
            self.email.as_str(),
            self.contact_phone.as_str(),
        ]
    }

    /// The searchable fields, in column order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.to_row().into_iter()
    }
}

/// A single failed validation rule for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// JSON name of the offending field
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl ErrorRecord {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A client paired with its current validation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedClient {
    pub client: Client,
    pub errors: Vec<ErrorRecord>,
    pub has_errors: bool,
}

impl AnnotatedClient {
    /// Pair a client with its errors; `has_errors` is derived from the list.
    pub fn new(client: Client, errors: Vec<ErrorRecord>) -> Self {
        let has_errors = !errors.is_empty();
        Self {
            client,
            errors,
            has_errors,
        }
    }
}
