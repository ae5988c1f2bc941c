use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::errors::{KeyboxError, Result};

static KEY_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{0,63}$").expect("key name pattern is valid")
});

/// Where the private half of a key lives.
///
/// The category is fixed when the record is created and alone decides
/// how the record may be deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCategory {
    /// Private key material is held in the store.
    Local,
    /// Public key only; the private key lives on another machine.
    Offline,
    /// Public key only; the private key lives on a Ledger device.
    Ledger,
}

impl KeyCategory {
    /// Whether deleting a record of this category destroys secret material.
    pub fn holds_secret(self) -> bool {
        matches!(self, KeyCategory::Local)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            KeyCategory::Local => "local",
            KeyCategory::Offline => "offline",
            KeyCategory::Ledger => "ledger",
        }
    }
}

impl std::fmt::Display for KeyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named entry in a key store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    pub name: String,
    pub category: KeyCategory,
    pub public_key: String,
    /// BIP-44 derivation path, only recorded for Ledger keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hd_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl KeyRecord {
    /// Check that `name` is usable as a key name.
    ///
    /// Both stores use the name as a file name, so separators, `..` and
    /// leading dots are rejected.
    pub fn validate_name(name: &str) -> Result<()> {
        if KEY_NAME.is_match(name) {
            Ok(())
        } else {
            Err(KeyboxError::InvalidKeyName {
                name: name.to_string(),
            })
        }
    }

    /// Short SHA-256 fingerprint of the public key (16 hex chars).
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.public_key.as_bytes());
        digest.iter().take(8).map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for KeyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.category)
    }
}
