use colored::Colorize;

use crate::cli::{context, output};
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::services::deletion_service::DeletionService;

/// Execute the `keybox list` command.
pub fn execute(legacy: bool) -> Result<()> {
    let home = context::keybox_home();
    let config = AppConfig::load(home)?;
    let store = super::store_helpers::open_store(home, legacy, &config);
    let store_name = store.name().to_string();
    let service = DeletionService { store };

    let records = service.list()?;
    if records.is_empty() {
        output::warning(&format!("No keys in the {store_name} store."));
        return Ok(());
    }

    output::header(&format!("Keys in the {store_name} store ({})", records.len()));
    for record in &records {
        println!(
            "  • {:<24} {:<8} {}",
            record.name.bold(),
            record.category.to_string(),
            record.fingerprint().dimmed()
        );
    }

    Ok(())
}
