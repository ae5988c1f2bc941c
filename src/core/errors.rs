/// All domain errors for keybox.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum KeyboxError {
    #[error(
        "Key '{name}' not found\n\n  \
         Run 'keybox list' to see the keys in this store.\n  \
         Keys in the legacy store are only visible with --legacy."
    )]
    NotFound { name: String },

    #[error("Aborted: key was not deleted")]
    Aborted,

    #[error(
        "Passphrase verification failed for key '{name}'\n\n  \
         The key was NOT deleted.\n\n  \
         Solutions:\n    \
         → Try again with the passphrase used to encrypt the key\n    \
         → Remove it without verification: keybox delete {name} --legacy --force"
    )]
    Unauthorized { name: String },

    #[error("Key store error: {detail}")]
    StoreIo { detail: String },

    #[error("Input error: {detail}")]
    Input { detail: String },

    #[error(
        "Invalid key name: '{name}'\n\n  \
         Key names must start with a letter or digit and may only contain\n  \
         letters, digits, '.', '_' and '-' (max 64 characters)."
    )]
    InvalidKeyName { name: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error("Audit log error: {detail}")]
    AuditError { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl KeyboxError {
    /// Process exit code for this error.
    /// `Aborted` maps to 2, every other error to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            KeyboxError::Aborted => 2,
            _ => 1,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KeyboxError>;
