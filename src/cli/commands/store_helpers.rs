use std::path::Path;

use crate::adapters::key_stores::keyring_key_store::KeyringKeyStore;
use crate::adapters::key_stores::legacy_key_store::LegacyKeyStore;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::traits::key_store::KeyStore;

const LEGACY_WARNING: &str =
    "IMPORTANT: using deprecated secret store. This will be removed in a future release.";

/// Open the key store selected by `--legacy`.
///
/// - legacy: `<home>/keys`, passphrase-encrypted key files
/// - default: `<home>/keyring` metadata + OS keyring secrets
pub fn open_store(home: &Path, legacy: bool, config: &AppConfig) -> Box<dyn KeyStore> {
    if legacy {
        eprintln!("{LEGACY_WARNING}");
        let dir = home.join("keys");
        output::verbose(&format!("Legacy store: {}", dir.display()));
        Box::new(LegacyKeyStore::new(dir).with_max_work_factor(config.legacy.max_work_factor))
    } else {
        let dir = home.join("keyring");
        output::verbose(&format!(
            "Keyring store: {} (service '{}')",
            dir.display(),
            config.keyring.service
        ));
        Box::new(KeyringKeyStore::new(dir, config.keyring.service.clone()))
    }
}
