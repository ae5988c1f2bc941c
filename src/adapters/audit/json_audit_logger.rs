use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config::app_config::AuditSection;
use crate::core::errors::{KeyboxError, Result};
use crate::core::models::audit_entry::AuditEntry;
use crate::core::traits::audit::AuditLogger;

/// Audit logger that appends entries as JSON lines to a file.
///
/// Each line in the log file is a self-contained JSON object representing
/// one `AuditEntry`.
pub struct JsonAuditLogger {
    log_path: PathBuf,
}

impl JsonAuditLogger {
    /// Create a logger that writes to `{home}/{log_file}`.
    pub fn new(home: &Path, log_file: &str) -> Self {
        Self {
            log_path: home.join(log_file),
        }
    }

    /// Create a logger from the `[audit]` section.
    pub fn from_config(home: &Path, audit_section: &AuditSection) -> Self {
        Self::new(home, &audit_section.log_file)
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

impl JsonAuditLogger {
    fn failure(&self, what: &str, e: impl std::fmt::Display) -> KeyboxError {
        KeyboxError::AuditError {
            detail: format!("{what} ({}): {e}", self.log_path.display()),
        }
    }
}

impl AuditLogger for JsonAuditLogger {
    /// Append `entry` as one line, written in a single call so
    /// concurrent deletions do not interleave.
    fn log_event(&self, entry: &AuditEntry) -> Result<()> {
        let mut line = serde_json::to_string(entry)
            .map_err(|e| self.failure("Cannot encode deletion record", e))?;
        line.push('\n');

        if let Some(dir) = self.log_path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| self.failure("Cannot create deletion log directory", e))?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .and_then(|mut file| file.write_all(line.as_bytes()))
            .map_err(|e| self.failure("Deletion not recorded", e))
    }

    fn query(&self) -> Result<Vec<AuditEntry>> {
        let content = match fs::read_to_string(&self.log_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.failure("Deletion log unreadable", e)),
        };

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                let what = format!("Bad deletion record on line {}", idx + 1);
                serde_json::from_str(line).map_err(|e| self.failure(&what, e))
            })
            .collect()
    }
}
