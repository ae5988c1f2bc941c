use std::path::PathBuf;

use age::secrecy::SecretString;

use super::record_dir::RecordDir;
use crate::core::errors::{KeyboxError, Result};
use crate::core::models::key_record::KeyRecord;
use crate::core::traits::key_store::KeyStore;

/// Default keyring service under which local key material is stored.
pub const DEFAULT_SERVICE: &str = "keybox";

/// Holder of the private key material of local keys.
pub trait CredentialVault {
    /// Remove the credential `(service, name)`. A credential that is
    /// already gone is not an error.
    fn delete_secret(&self, service: &str, name: &str) -> Result<()>;
}

/// The platform keyring.
///
/// - macOS: Keychain
/// - Linux: kernel keyutils
/// - Windows: Credential Manager
pub struct OsKeyring;

impl CredentialVault for OsKeyring {
    fn delete_secret(&self, service: &str, name: &str) -> Result<()> {
        let entry = keyring::Entry::new(service, name).map_err(|e| keyring_error(name, e))?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(keyring_error(name, e)),
        }
    }
}

/// Key store backed by the OS keyring.
///
/// The keyring cannot be enumerated, so record metadata lives in
/// `<home>/keyring/<name>.json`. Private key material of local keys is
/// the credential `(service, name)`. The platform unlocks the keyring,
/// so deletion never verifies a passphrase.
pub struct KeyringKeyStore<V: CredentialVault = OsKeyring> {
    records: RecordDir,
    service: String,
    vault: V,
}

impl KeyringKeyStore {
    /// Create a store with metadata in `dir` and secrets under `service`.
    pub fn new(dir: PathBuf, service: impl Into<String>) -> Self {
        Self::with_vault(dir, service, OsKeyring)
    }
}

impl<V: CredentialVault> KeyringKeyStore<V> {
    pub fn with_vault(dir: PathBuf, service: impl Into<String>, vault: V) -> Self {
        Self {
            records: RecordDir::new(dir),
            service: service.into(),
            vault,
        }
    }
}

impl<V: CredentialVault> KeyStore for KeyringKeyStore<V> {
    fn get(&self, name: &str) -> Result<KeyRecord> {
        self.records.read(name)
    }

    fn delete(
        &self,
        name: &str,
        _passphrase: &SecretString,
        _skip_passphrase_check: bool,
    ) -> Result<()> {
        let record: KeyRecord = self.records.read(name)?;

        // The record leaves get/list before the secret is touched, and
        // comes back if the secret cannot be removed.
        self.records.begin_remove(name)?;

        if record.category.holds_secret()
            && let Err(e) = self.vault.delete_secret(&self.service, name)
        {
            self.records.restore(name)?;
            return Err(e);
        }

        // A leftover tombstone is invisible to get/list; the key is gone.
        let _ = self.records.finish_remove(name);
        Ok(())
    }

    fn list(&self) -> Result<Vec<KeyRecord>> {
        self.records.read_all()
    }

    fn name(&self) -> &str {
        "keyring"
    }
}

fn keyring_error(name: &str, e: keyring::Error) -> KeyboxError {
    KeyboxError::StoreIo {
        detail: format!("OS keyring failed for key '{name}': {e}"),
    }
}
