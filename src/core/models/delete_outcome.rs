use crate::core::models::key_record::KeyRecord;

/// How a successful deletion ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Only the locally stored public key reference was removed.
    ReferenceRemoved,
    /// Private key material was destroyed.
    SecretDestroyed,
}

impl DeleteOutcome {
    /// Terminal status line shown to the operator.
    pub fn status_message(self) -> &'static str {
        match self {
            DeleteOutcome::ReferenceRemoved => {
                "Public key reference deleted; private key material was not touched"
            }
            DeleteOutcome::SecretDestroyed => {
                "Key deleted forever; the private key material cannot be recovered"
            }
        }
    }

    /// Stable identifier recorded in the audit log.
    pub fn as_str(self) -> &'static str {
        match self {
            DeleteOutcome::ReferenceRemoved => "reference_removed",
            DeleteOutcome::SecretDestroyed => "secret_destroyed",
        }
    }
}

/// A key removed by the deletion service, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedKey {
    pub record: KeyRecord,
    pub outcome: DeleteOutcome,
    /// Set when the status line could not be written. The key is gone
    /// regardless.
    pub status_error: Option<String>,
}
