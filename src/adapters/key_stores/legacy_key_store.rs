use std::io::Read;
use std::path::PathBuf;

use age::secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::record_dir::RecordDir;
use crate::core::errors::{KeyboxError, Result};
use crate::core::models::key_record::KeyRecord;
use crate::core::traits::key_store::KeyStore;

/// One key file of the legacy store.
///
/// Local keys carry their private key material encrypted to the key's
/// passphrase with an age scrypt recipient, ASCII-armored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyEntry {
    #[serde(flatten)]
    pub record: KeyRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armored_secret: Option<String>,
}

/// Deprecated on-disk key store.
///
/// Layout: `<home>/keys/<name>.json`, one file per key. Deleting a local
/// key requires its passphrase unless the caller skips the check.
pub struct LegacyKeyStore {
    records: RecordDir,
    max_work_factor: Option<u8>,
}

impl LegacyKeyStore {
    /// Create a store rooted at `dir` (usually `<home>/keys`).
    pub fn new(dir: PathBuf) -> Self {
        Self {
            records: RecordDir::new(dir),
            max_work_factor: None,
        }
    }

    /// Upper bound on the scrypt work factor accepted while verifying a
    /// passphrase. Without it age picks a limit from the machine's speed.
    pub fn with_max_work_factor(mut self, max_work_factor: Option<u8>) -> Self {
        self.max_work_factor = max_work_factor;
        self
    }

    /// Check `passphrase` by decrypting the key material of `entry`.
    fn verify_passphrase(&self, entry: &LegacyEntry, passphrase: &SecretString) -> Result<()> {
        let name = &entry.record.name;
        let armored = entry
            .armored_secret
            .as_deref()
            .ok_or_else(|| KeyboxError::StoreIo {
                detail: format!("Key '{name}' has no encrypted key material to verify"),
            })?;

        let armored_reader = age::armor::ArmoredReader::new(armored.as_bytes());
        let decryptor =
            age::Decryptor::new(armored_reader).map_err(|e| KeyboxError::StoreIo {
                detail: format!("Key '{name}' has unreadable key material: {e}"),
            })?;

        let mut identity =
            age::scrypt::Identity::new(SecretString::from(passphrase.expose_secret().to_owned()));
        if let Some(max) = self.max_work_factor {
            identity.set_max_work_factor(max);
        }

        let mut reader = decryptor
            .decrypt(std::iter::once(&identity as &dyn age::Identity))
            .map_err(|e| match e {
                age::DecryptError::DecryptionFailed | age::DecryptError::NoMatchingKeys => {
                    KeyboxError::Unauthorized { name: name.clone() }
                }
                age::DecryptError::ExcessiveWork { required, .. } => KeyboxError::StoreIo {
                    detail: format!(
                        "Key '{name}' needs scrypt work factor {required}, above the \
                         configured maximum"
                    ),
                },
                other => KeyboxError::StoreIo {
                    detail: format!("Cannot verify passphrase for '{name}': {other}"),
                },
            })?;

        let mut material = Vec::new();
        reader
            .read_to_end(&mut material)
            .map_err(|e| KeyboxError::StoreIo {
                detail: format!("Key '{name}' has damaged key material: {e}"),
            })?;
        material.fill(0);

        Ok(())
    }
}

impl KeyStore for LegacyKeyStore {
    fn get(&self, name: &str) -> Result<KeyRecord> {
        let entry: LegacyEntry = self.records.read(name)?;
        Ok(entry.record)
    }

    fn delete(
        &self,
        name: &str,
        passphrase: &SecretString,
        skip_passphrase_check: bool,
    ) -> Result<()> {
        let entry: LegacyEntry = self.records.read(name)?;

        // Offline and ledger entries have no secret to verify against.
        if entry.record.category.holds_secret() && !skip_passphrase_check {
            self.verify_passphrase(&entry, passphrase)?;
        }

        self.records.remove(name)
    }

    fn list(&self) -> Result<Vec<KeyRecord>> {
        let entries: Vec<LegacyEntry> = self.records.read_all()?;
        Ok(entries.into_iter().map(|e| e.record).collect())
    }

    fn name(&self) -> &str {
        "legacy"
    }
}
