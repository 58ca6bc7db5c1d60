//! Store configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Characters Excel does not allow in a worksheet name
const FORBIDDEN_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Where the client sheet lives and how to treat a missing file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the workbook (default: "./clients.xlsx"). A `.csv` path
    /// stores the sheet as CSV instead.
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Worksheet holding the clients (default: "Hoja1")
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// Create a header-only sheet at startup when the file is missing
    /// (default: false)
    #[serde(default)]
    pub create_if_missing: bool,
}

fn default_path() -> PathBuf {
    PathBuf::from("./clients.xlsx")
}

fn default_sheet_name() -> String {
    "Hoja1".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            sheet_name: default_sheet_name(),
            create_if_missing: false,
        }
    }
}

impl StoreConfig {
    /// Config pointing at `path` with defaults for everything else
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Reject settings the store cannot work with
    pub fn check(&self) -> Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err("path must not be empty".into());
        }
        if self.sheet_name.trim().is_empty() {
            return Err("sheet_name must not be empty".into());
        }
        if self.sheet_name.chars().count() > 31 {
            return Err("sheet_name must be at most 31 characters".into());
        }
        if self.sheet_name.contains(FORBIDDEN_SHEET_CHARS) {
            return Err(format!(
                "sheet_name must not contain any of {:?}",
                FORBIDDEN_SHEET_CHARS
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.path, PathBuf::from("./clients.xlsx"));
        assert_eq!(config.sheet_name, "Hoja1");
        assert!(!config.create_if_missing);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"path": "/data/bdexcel.xlsx"}"#).unwrap();
        assert_eq!(config.path, PathBuf::from("/data/bdexcel.xlsx"));
        assert_eq!(config.sheet_name, "Hoja1");
        assert!(!config.create_if_missing);
    }

    #[test]
    fn test_check_sheet_name() {
        let mut config = StoreConfig::default();
        config.sheet_name = " ".into();
        assert!(config.check().is_err());

        config.sheet_name = "Clientes/2024".into();
        assert!(config.check().unwrap_err().contains("sheet_name"));

        config.sheet_name = "x".repeat(32);
        assert!(config.check().is_err());

        config.sheet_name = "Clientes 2024".into();
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_check_empty_path() {
        let config = StoreConfig::with_path("");
        assert_eq!(config.check(), Err("path must not be empty".to_string()));
    }
}
