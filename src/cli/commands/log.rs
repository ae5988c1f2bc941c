use colored::Colorize;

use crate::adapters::audit::json_audit_logger::JsonAuditLogger;
use crate::cli::{context, output};
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::models::audit_entry::{AuditAction, AuditEntry};
use crate::core::models::key_record::KeyCategory;
use crate::core::traits::audit::AuditLogger;

/// Execute the `keybox log` command.
///
/// Displays the deletion history, optionally limited to the last N entries.
pub fn execute(last: Option<usize>) -> Result<()> {
    let home = context::keybox_home();
    let config = AppConfig::load(home)?;
    let logger = JsonAuditLogger::from_config(home, &config.audit);
    output::verbose(&format!("Audit log: {}", logger.path().display()));

    let entries = logger.query()?;

    if entries.is_empty() {
        output::header("keybox log");
        output::warning("No audit entries found");
        return Ok(());
    }

    // Apply --last N (take from the end)
    let skip = last.map_or(0, |n| entries.len().saturating_sub(n));
    let display = &entries[skip..];

    output::header(&format!("keybox log ({} entries)", display.len()));
    println!();

    for entry in display {
        print_entry(entry);
    }

    Ok(())
}

/// Print a single audit entry as a formatted row.
fn print_entry(entry: &AuditEntry) {
    let date = entry.timestamp.format("%Y-%m-%d %H:%M:%S");

    println!(
        "  {} {} {:<10} {:<20} {} {}",
        date.to_string().dimmed(),
        "│".dimmed(),
        format_action(&entry.action, entry.category),
        entry.key,
        format!("{} store", entry.store).dimmed(),
        entry.author.dimmed(),
    );
}

/// Format an AuditAction as a colored string.
fn format_action(action: &AuditAction, category: KeyCategory) -> String {
    match (action, category.holds_secret()) {
        (AuditAction::KeyDelete, true) => "destroyed".red().to_string(),
        (AuditAction::KeyDelete, false) => "unlinked".yellow().to_string(),
    }
}
