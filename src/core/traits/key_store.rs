use age::secrecy::SecretString;

use crate::core::errors::Result;
use crate::core::models::key_record::KeyRecord;

/// Port for key storage back-ends.
///
/// Implementations live in `adapters::key_stores` (legacy on-disk store,
/// OS keyring store). The deletion service only depends on this trait.
pub trait KeyStore {
    /// Resolve a name to its record. Fails with `NotFound`.
    fn get(&self, name: &str) -> Result<KeyRecord>;

    /// Remove the record called `name`.
    ///
    /// Local records lose their private key material. Offline and ledger
    /// records only lose the locally stored reference. When
    /// `skip_passphrase_check` is false, back-ends that encrypt key material
    /// must verify `passphrase` first and fail with `Unauthorized`.
    fn delete(
        &self,
        name: &str,
        passphrase: &SecretString,
        skip_passphrase_check: bool,
    ) -> Result<()>;

    /// All records, sorted by name.
    fn list(&self) -> Result<Vec<KeyRecord>>;

    /// Human-readable back-end name (e.g. "legacy", "keyring").
    fn name(&self) -> &str;
}

impl<T: KeyStore + ?Sized> KeyStore for Box<T> {
    fn get(&self, name: &str) -> Result<KeyRecord> {
        (**self).get(name)
    }

    fn delete(
        &self,
        name: &str,
        passphrase: &SecretString,
        skip_passphrase_check: bool,
    ) -> Result<()> {
        (**self).delete(name, passphrase, skip_passphrase_check)
    }

    fn list(&self) -> Result<Vec<KeyRecord>> {
        (**self).list()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
