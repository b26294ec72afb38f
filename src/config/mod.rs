//! Configuration loading and management

use crate::core::bill::DEFAULT_PCT;
use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Receipt upload rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptConfig {
    /// MIME types accepted for receipt files
    pub allowed_types: Vec<String>,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            allowed_types: vec![
                "image/png".to_string(),
                "image/jpeg".to_string(),
                "image/jpg".to_string(),
            ],
        }
    }
}

impl ReceiptConfig {
    /// Whether a MIME type is in the allow-list (case-insensitive)
    pub fn allows(&self, mime_type: &str) -> bool {
        self.allowed_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(mime_type.trim()))
    }
}

/// Defaults applied to new bills
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillConfig {
    pub default_pct: u32,
}

impl Default for BillConfig {
    fn default() -> Self {
        Self {
            default_pct: DEFAULT_PCT,
        }
    }
}

/// Admin review rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Hide the admin's own bills and the fixture accounts below
    pub exclude_test_fixtures: bool,

    /// Fixture accounts never shown on the dashboard
    pub excluded_emails: Vec<String>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            exclude_test_fixtures: true,
            excluded_emails: vec![
                "employee@test.tld".to_string(),
                "admin@test.tld".to_string(),
            ],
        }
    }
}

/// Complete configuration for the billed core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BilledConfig {
    pub receipts: ReceiptConfig,
    pub bills: BillConfig,
    pub review: ReviewConfig,

    /// Default `tracing` filter, overridden by `RUST_LOG`
    pub log_filter: String,
}

impl Default for BilledConfig {
    fn default() -> Self {
        Self {
            receipts: ReceiptConfig::default(),
            bills: BillConfig::default(),
            review: ReviewConfig::default(),
            log_filter: "billed=info".to_string(),
        }
    }
}

impl BilledConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    ///
    /// Missing sections keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.receipts.allowed_types.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "receipts.allowed_types".to_string(),
                message: "at least one MIME type is required".to_string(),
            });
        }
        if self.bills.default_pct > 100 {
            return Err(ConfigError::InvalidValue {
                field: "bills.default_pct".to_string(),
                message: format!("{} is not a percentage", self.bills.default_pct),
            });
        }
        Ok(())
    }
}
