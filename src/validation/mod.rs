//! Validation engine for client records
//!
//! Validation is pure: it never touches storage, and its output is never
//! persisted. Every read path recomputes it.
//!
//! Field checks run in a fixed order (key, contact name, email, phone) and
//! each failing check contributes one `ErrorRecord` tagged with the field's
//! JSON name.
//!
//! Rules that vary per deployment (email allowlist, phone regions) are carried
//! by `ValidationRules` and injected into `ClientValidator`.

mod errors;
mod rules;
mod validator;

pub use errors::ValidationError;
pub use rules::{PhoneRegion, ValidationRules};
pub use validator::{
    ClientValidator, FIELD_CONTACT_NAME, FIELD_CONTACT_PHONE, FIELD_EMAIL, FIELD_KEY,
};
