use std::path::Path;

use chrono::Utc;

use crate::adapters::audit::json_audit_logger::JsonAuditLogger;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::models::audit_entry::{AuditAction, AuditEntry};
use crate::core::models::delete_outcome::DeletedKey;
use crate::core::traits::audit::AuditLogger;

/// Name of the operator running keybox, from the environment.
/// Returns `"unknown"` when neither `USER` nor `USERNAME` is set.
pub fn operator() -> String {
    ["USER", "USERNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Record a completed deletion. Warns on failure instead of propagating
/// the error, since the key is already gone.
pub fn log_deletion(home: &Path, config: &AppConfig, store: &str, deleted: &DeletedKey) {
    if !config.audit.enabled {
        return;
    }

    let logger = JsonAuditLogger::from_config(home, &config.audit);
    let entry = AuditEntry {
        timestamp: Utc::now(),
        author: operator(),
        action: AuditAction::KeyDelete,
        key: deleted.record.name.clone(),
        category: deleted.record.category,
        store: store.to_string(),
        outcome: deleted.outcome.as_str().to_string(),
    };

    if let Err(e) = logger.log_event(&entry) {
        output::notice(&format!("Could not write audit log: {e}"));
    }
}
