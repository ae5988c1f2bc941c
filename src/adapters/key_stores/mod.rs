pub mod keyring_key_store;
pub mod legacy_key_store;
pub mod record_dir;
