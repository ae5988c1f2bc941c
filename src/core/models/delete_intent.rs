/// Operator intents for a single `keybox delete` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteIntent {
    pub name: String,
    /// Skip the yes/no prompt when removing an offline or ledger reference.
    pub skip_confirmation: bool,
    /// Remove a local key without verifying its passphrase.
    pub force_no_passphrase: bool,
    /// Operate on the legacy on-disk store instead of the OS keyring.
    pub use_legacy_store: bool,
}

impl DeleteIntent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether deleting a local key must first verify its passphrase.
    ///
    /// The keyring store is unlocked by the platform, so only the legacy
    /// store asks, and `--force` turns the check off.
    pub fn needs_passphrase(&self) -> bool {
        !self.force_no_passphrase && self.use_legacy_store
    }
}
