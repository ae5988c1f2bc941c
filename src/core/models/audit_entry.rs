use serde::{Deserialize, Serialize};

/// Actions that get recorded in the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    KeyDelete,
}

/// A single entry in the audit log (JSON lines format).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub author: String,
    pub action: AuditAction,
    pub key: String,
    pub category: crate::core::models::key_record::KeyCategory,
    pub store: String,
    pub outcome: String,
}
