use serde::Deserialize;
use std::path::Path;

use crate::adapters::key_stores::keyring_key_store::DEFAULT_SERVICE;
use crate::core::errors::{KeyboxError, Result};

/// Top-level keybox configuration read from `<home>/config.toml`.
///
/// Every section is optional; a missing file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub keyring: KeyringSection,
    pub legacy: LegacySection,
    pub audit: AuditSection,
}

impl AppConfig {
    /// Load the configuration from `<home>/config.toml`.
    ///
    /// After parsing, validates the audit log filename so a crafted
    /// config cannot point writes outside the home directory.
    pub fn load(home: &Path) -> Result<Self> {
        let config_path = home.join("config.toml");
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content).map_err(|e| KeyboxError::InvalidConfig {
            detail: format!("Failed to parse {}: {e}", config_path.display()),
        })?;

        validate_simple_filename(&config.audit.log_file, "audit log file")?;

        if config.keyring.service.trim().is_empty() {
            return Err(KeyboxError::InvalidConfig {
                detail: "keyring.service must not be empty".into(),
            });
        }

        Ok(config)
    }
}

/// The `[keyring]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeyringSection {
    /// Service name under which local key material is stored.
    pub service: String,
}

impl Default for KeyringSection {
    fn default() -> Self {
        Self {
            service: DEFAULT_SERVICE.to_string(),
        }
    }
}

/// The `[legacy]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LegacySection {
    /// Highest scrypt work factor (log2 N) accepted when verifying a
    /// passphrase. Unset lets age choose from the machine's speed.
    pub max_work_factor: Option<u8>,
}

/// The `[audit]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditSection {
    pub enabled: bool,
    pub log_file: String,
}

impl Default for AuditSection {
    fn default() -> Self {
        Self {
            enabled: true,
            log_file: "audit.log".to_string(),
        }
    }
}

/// Ensure `name` is a bare file name (no directories, no traversal).
fn validate_simple_filename(name: &str, what: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\');
    if invalid {
        return Err(KeyboxError::InvalidConfig {
            detail: format!("Invalid {what} '{name}': must be a plain file name"),
        });
    }
    Ok(())
}
