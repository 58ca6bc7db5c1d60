//! Field and record validators
//!
//! Each field check returns `None` when the value passes, or the message to
//! report. Messages are ordered: the first failing condition wins.

use std::sync::LazyLock;

use regex::Regex;

use super::errors::ValidationError;
use super::rules::ValidationRules;
use crate::model::{AnnotatedClient, Client, ErrorRecord};

pub const FIELD_KEY: &str = "key";
pub const FIELD_CONTACT_NAME: &str = "contactName";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_CONTACT_PHONE: &str = "contactPhone";

/// Total digits in a phone number once separators are stripped
const PHONE_DIGITS: usize = 10;
/// Digits after the area prefix
const LOCAL_DIGITS: usize = 7;

static DIGITS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("digits pattern is valid"));

static ANY_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]").expect("digit pattern is valid"));

// Whitespace here is ASCII only; NBSP and other Unicode spaces are not
// separators.
static EMAIL_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^ \t\n\f\r@]+@[^ \t\n\f\r@]+\.[^ \t\n\f\r@]+$")
        .expect("email pattern is valid")
});

static PHONE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\n\f\r\-()]+").expect("separator pattern is valid"));

/// Validates clients against an injected rule set.
///
/// Stateless apart from the rules; safe to share between requests.
#[derive(Debug, Clone, Default)]
pub struct ClientValidator {
    rules: ValidationRules,
}

impl ClientValidator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Key must be present and made of ASCII digits only.
    pub fn validate_key(&self, key: &str) -> Option<String> {
        if key.is_empty() {
            return Some("key is required".into());
        }
        if !DIGITS_ONLY.is_match(key) {
            return Some("key must contain digits only".into());
        }
        None
    }

    /// Contact name must be present and contain no digits.
    pub fn validate_contact_name(&self, name: &str) -> Option<String> {
        if name.is_empty() {
            return Some("contact name is required".into());
        }
        if ANY_DIGIT.is_match(name) {
            return Some("contact name must not contain digits".into());
        }
        None
    }

    /// Email must be well-formed and use an allowlisted domain.
    ///
    /// A domain outside the allowlist whose last label has at least two
    /// characters gets an advisory message instead of the hard rejection.
    /// Both still count as errors for the record.
    pub fn validate_email(&self, email: &str) -> Option<String> {
        if email.is_empty() {
            return Some("email is required".into());
        }
        if !EMAIL_FORMAT.is_match(email) {
            return Some("invalid email format".into());
        }

        let Some((_, domain)) = email.split_once('@') else {
            return Some("invalid email format".into());
        };
        let domain = domain.to_lowercase();

        if self.rules.is_known_domain(&domain) {
            return None;
        }

        if let Some((_, tld)) = domain.rsplit_once('.') {
            if tld.chars().count() >= 2 {
                return Some("a known email provider is recommended".into());
            }
        }

        Some("please use a known email provider".into())
    }

    /// Phone must be exactly ten digits starting with a configured prefix.
    ///
    /// Whitespace, hyphens and parentheses are stripped first.
    pub fn validate_phone(&self, phone: &str) -> Option<String> {
        if phone.is_empty() {
            return Some("phone is required".into());
        }

        let digits = PHONE_SEPARATORS.replace_all(phone, "");
        if !DIGITS_ONLY.is_match(&digits) {
            return Some(
                "phone must contain digits only (spaces, hyphens and parentheses are allowed)"
                    .into(),
            );
        }

        if digits.len() < PHONE_DIGITS {
            return Some("phone must have at least 10 digits including the area prefix".into());
        }

        let Some(region) = self.rules.region_for(&digits) else {
            return Some(format!(
                "phone must be from the supported region. Valid prefixes: {}",
                self.rules.describe_regions()
            ));
        };

        if digits.len() != PHONE_DIGITS {
            return Some("phone must have exactly 10 digits (3 prefix + 7 local)".into());
        }

        // digits is ASCII here, so byte slicing is safe
        let local = &digits[region.prefix.len()..];
        if local.len() != LOCAL_DIGITS {
            return Some(format!(
                "after the area prefix ({}) there must be exactly 7 digits",
                region.prefix
            ));
        }

        None
    }

    /// Run every field check in order and collect the failures.
    pub fn validate_client(&self, client: &Client) -> Vec<ErrorRecord> {
        let checks = [
            (FIELD_KEY, self.validate_key(&client.key)),
            (FIELD_CONTACT_NAME, self.validate_contact_name(&client.contact_name)),
            (FIELD_EMAIL, self.validate_email(&client.email)),
            (FIELD_CONTACT_PHONE, self.validate_phone(&client.contact_phone)),
        ];

        checks
            .into_iter()
            .filter_map(|(field, message)| message.map(|m| ErrorRecord::new(field, m)))
            .collect()
    }

    /// Like `validate_client`, but as a `Result` for write paths.
    pub fn check(&self, client: &Client) -> Result<(), ValidationError> {
        let errors = self.validate_client(client);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(errors))
        }
    }

    /// Pair a client with its validation result
    pub fn annotate(&self, client: Client) -> AnnotatedClient {
        let errors = self.validate_client(&client);
        AnnotatedClient::new(client, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::PhoneRegion;

    fn validator() -> ClientValidator {
        ClientValidator::default()
    }

    fn valid_client() -> Client {
        Client::new("1001", "Ana López", "ana@gmail.com", "961 123 4567")
    }

    // =========================================================================
    // Key
    // =========================================================================

    #[test]
    fn test_key_rules() {
        let v = validator();
        assert_eq!(v.validate_key(""), Some("key is required".into()));
        assert_eq!(v.validate_key("12a"), Some("key must contain digits only".into()));
        assert_eq!(v.validate_key(" 12"), Some("key must contain digits only".into()));
        assert_eq!(v.validate_key("0042"), None);
    }

    #[test]
    fn test_key_rejects_non_ascii_digits() {
        // Arabic-Indic digits are not accepted as key digits
        assert!(validator().validate_key("١٢٣").is_some());
    }

    // =========================================================================
    // Contact name
    // =========================================================================

    #[test]
    fn test_contact_name_rules() {
        let v = validator();
        assert_eq!(v.validate_contact_name(""), Some("contact name is required".into()));
        assert_eq!(
            v.validate_contact_name("Agent 47"),
            Some("contact name must not contain digits".into())
        );
        assert_eq!(v.validate_contact_name("María-José O'Neil"), None);
    }

    // =========================================================================
    // Email
    // =========================================================================

    #[test]
    fn test_email_required_and_format() {
        let v = validator();
        assert_eq!(v.validate_email(""), Some("email is required".into()));
        assert_eq!(v.validate_email("no-at-sign.com"), Some("invalid email format".into()));
        assert_eq!(v.validate_email("a@nodot"), Some("invalid email format".into()));
        assert_eq!(v.validate_email("a b@gmail.com"), Some("invalid email format".into()));
        assert_eq!(v.validate_email("a@b@gmail.com"), Some("invalid email format".into()));
    }

    #[test]
    fn test_email_format_allows_unicode_spaces() {
        // only ASCII whitespace breaks the address shape
        let v = validator();
        assert_eq!(v.validate_email("a\u{a0}b@gmail.com"), None);
        assert_eq!(v.validate_email("a\tb@gmail.com"), Some("invalid email format".into()));
    }

    #[test]
    fn test_email_known_domain_passes() {
        let v = validator();
        assert_eq!(v.validate_email("a@gmail.com"), None);
        assert_eq!(v.validate_email("Someone@GMAIL.COM"), None);
        assert_eq!(v.validate_email("x@rocketmail.com"), None);
    }

    #[test]
    fn test_email_business_domain_gets_advisory() {
        let v = validator();
        assert_eq!(
            v.validate_email("a@unknown-provider.xyz"),
            Some("a known email provider is recommended".into())
        );
        assert_eq!(
            v.validate_email("sales@acme.com.mx"),
            Some("a known email provider is recommended".into())
        );
    }

    #[test]
    fn test_email_short_tld_gets_hard_message() {
        assert_eq!(
            validator().validate_email("a@foo.x"),
            Some("please use a known email provider".into())
        );
    }

    #[test]
    fn test_email_custom_allowlist() {
        let v = ClientValidator::new(ValidationRules {
            known_email_domains: vec!["acme.test".into()],
            ..Default::default()
        });
        assert_eq!(v.validate_email("a@acme.test"), None);
        assert!(v.validate_email("a@gmail.com").is_some());
    }

    // =========================================================================
    // Phone
    // =========================================================================

    #[test]
    fn test_phone_accepts_separators() {
        let v = validator();
        assert_eq!(v.validate_phone("961 123 4567"), None);
        assert_eq!(v.validate_phone("(962) 123-4567"), None);
        assert_eq!(v.validate_phone("9941234567"), None);
    }

    #[test]
    fn test_phone_required() {
        assert_eq!(validator().validate_phone(""), Some("phone is required".into()));
    }

    #[test]
    fn test_phone_non_digits() {
        let msg = validator().validate_phone("961.123.4567").unwrap();
        assert!(msg.starts_with("phone must contain digits only"));
        let msg = validator().validate_phone("+52 961 123 4567").unwrap();
        assert!(msg.starts_with("phone must contain digits only"));
    }

    #[test]
    fn test_phone_unicode_spaces_are_not_separators() {
        let v = validator();
        assert_eq!(v.validate_phone("961\t123\t4567"), None);
        for phone in ["961\u{a0}1234567", "961\u{3000}1234567", "961\u{2009}1234567"] {
            let msg = v.validate_phone(phone).unwrap();
            assert!(msg.starts_with("phone must contain digits only"), "{phone:?}");
        }
    }

    #[test]
    fn test_phone_too_short() {
        let msg = validator().validate_phone("961 123 456").unwrap();
        assert!(msg.contains("at least 10 digits"));
    }

    #[test]
    fn test_phone_wrong_region_lists_prefixes() {
        let msg = validator().validate_phone("555-1234567").unwrap();
        assert!(msg.starts_with("phone must be from the supported region"));
        assert!(msg.contains("961 (Tuxtla Gutiérrez)"));
        assert!(msg.contains("994 (Mapastepec)"));
    }

    #[test]
    fn test_phone_too_long() {
        let msg = validator().validate_phone("9611234567890").unwrap();
        assert_eq!(msg, "phone must have exactly 10 digits (3 prefix + 7 local)");
    }

    #[test]
    fn test_phone_region_is_checked_before_length() {
        // Too long and out of region: region message wins
        let msg = validator().validate_phone("5551234567890").unwrap();
        assert!(msg.contains("supported region"));
    }

    #[test]
    fn test_phone_custom_regions() {
        let v = ClientValidator::new(ValidationRules {
            phone_regions: vec![PhoneRegion::new("555", "Testville")],
            ..Default::default()
        });
        assert_eq!(v.validate_phone("555-123-4567"), None);
        assert!(v.validate_phone("961 123 4567").unwrap().contains("555 (Testville)"));
    }

    // =========================================================================
    // Record
    // =========================================================================

    #[test]
    fn test_valid_client_has_no_errors() {
        assert!(validator().validate_client(&valid_client()).is_empty());
        assert!(validator().check(&valid_client()).is_ok());
    }

    #[test]
    fn test_errors_follow_field_order() {
        let client = Client::new("abc", "R2D2", "bad", "123");
        let errors = validator().validate_client(&client);
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["key", "contactName", "email", "contactPhone"]);
    }

    #[test]
    fn test_only_failing_fields_reported() {
        let mut client = valid_client();
        client.email = "ana@acme.com".into();
        let errors = validator().validate_client(&client);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, FIELD_EMAIL);
    }

    #[test]
    fn test_advisory_email_marks_record_as_erroneous() {
        let mut client = valid_client();
        client.email = "ana@unknown-provider.xyz".into();
        let annotated = validator().annotate(client);
        assert!(annotated.has_errors);
        assert_eq!(annotated.errors[0].message, "a known email provider is recommended");
    }

    #[test]
    fn test_check_returns_all_errors() {
        let err = validator()
            .check(&Client::new("", "", "", ""))
            .unwrap_err();
        assert_eq!(err.errors.len(), 4);
        assert_eq!(err.fields(), vec!["key", "contactName", "email", "contactPhone"]);
    }
}
