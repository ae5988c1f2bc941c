use crate::core::errors::Result;
use crate::core::models::audit_entry::AuditEntry;

/// Port for recording and querying audit events.
pub trait AuditLogger {
    /// Append an entry to the audit log.
    fn log_event(&self, entry: &AuditEntry) -> Result<()>;

    /// All entries, oldest first.
    fn query(&self) -> Result<Vec<AuditEntry>>;
}
