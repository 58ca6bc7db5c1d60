//! Injected validation rules
//!
//! Defaults reproduce the production allowlists. Tests and deployments can
//! substitute their own through the config file.

use serde::{Deserialize, Serialize};

/// A phone area prefix accepted by the phone check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneRegion {
    /// Three-digit area prefix
    pub prefix: String,
    /// Place name shown in the rejection message
    pub place: String,
}

impl PhoneRegion {
    pub fn new(prefix: impl Into<String>, place: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            place: place.into(),
        }
    }
}

/// Rule set used by `ClientValidator`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    /// Email domains accepted without any message (compared lower-cased)
    #[serde(default = "default_known_email_domains")]
    pub known_email_domains: Vec<String>,

    /// Accepted phone prefixes, checked in order
    #[serde(default = "default_phone_regions")]
    pub phone_regions: Vec<PhoneRegion>,
}

fn default_known_email_domains() -> Vec<String> {
    [
        "gmail.com",
        "hotmail.com",
        "outlook.com",
        "yahoo.com",
        "live.com",
        "icloud.com",
        "aol.com",
        "protonmail.com",
        "zoho.com",
        "mail.com",
        "yandex.com",
        "gmx.com",
        "tutanota.com",
        "fastmail.com",
        "rocketmail.com",
    ]
    .iter()
    .map(|d| d.to_string())
    .collect()
}

fn default_phone_regions() -> Vec<PhoneRegion> {
    vec![
        PhoneRegion::new("961", "Tuxtla Gutiérrez"),
        PhoneRegion::new("962", "San Cristóbal"),
        PhoneRegion::new("963", "Tapachula"),
        PhoneRegion::new("964", "Palenque"),
        PhoneRegion::new("965", "Tonalá"),
        PhoneRegion::new("966", "Arriaga"),
        PhoneRegion::new("967", "Las Margaritas"),
        PhoneRegion::new("968", "Villaflores"),
        PhoneRegion::new("992", "Reforma"),
        PhoneRegion::new("994", "Mapastepec"),
    ]
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            known_email_domains: default_known_email_domains(),
            phone_regions: default_phone_regions(),
        }
    }
}

impl ValidationRules {
    /// Check the rule set is usable.
    ///
    /// Both lists must be non-empty and every prefix must be exactly three
    /// ASCII digits, since the phone check splits numbers as 3 + 7.
    pub fn check(&self) -> Result<(), String> {
        if self.known_email_domains.is_empty() {
            return Err("known_email_domains must not be empty".into());
        }
        if self.known_email_domains.iter().any(|d| d.trim().is_empty()) {
            return Err("known_email_domains must not contain blank entries".into());
        }
        if self.phone_regions.is_empty() {
            return Err("phone_regions must not be empty".into());
        }
        for region in &self.phone_regions {
            if region.prefix.len() != 3 || !region.prefix.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!(
                    "phone prefix '{}' must be exactly 3 digits",
                    region.prefix
                ));
            }
        }
        Ok(())
    }

    /// Whether `domain` (already lower-cased) is on the allowlist
    pub fn is_known_domain(&self, domain: &str) -> bool {
        self.known_email_domains
            .iter()
            .any(|known| known.eq_ignore_ascii_case(domain))
    }

    /// First configured region whose prefix starts `digits`
    pub fn region_for(&self, digits: &str) -> Option<&PhoneRegion> {
        self.phone_regions
            .iter()
            .find(|region| digits.starts_with(region.prefix.as_str()))
    }

    /// "961 (Tuxtla Gutiérrez), 962 (...)" for rejection messages
    pub fn describe_regions(&self) -> String {
        self.phone_regions
            .iter()
            .map(|r| format!("{} ({})", r.prefix, r.place))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
