use crate::cli::{context, output};
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::services::deletion_service::DeletionService;

/// Execute the `keybox show` command.
pub fn execute(name: &str, legacy: bool) -> Result<()> {
    let home = context::keybox_home();
    let config = AppConfig::load(home)?;
    let service = DeletionService {
        store: super::store_helpers::open_store(home, legacy, &config),
    };

    let record = service.get(name)?;

    output::header(&format!("Key '{}'", record.name));
    println!("  Category:     {}", record.category);
    println!("  Public key:   {}", record.public_key);
    println!("  Fingerprint:  {}", record.fingerprint());
    if let Some(path) = &record.hd_path {
        println!("  HD path:      {path}");
    }
    if let Some(created) = record.created_at {
        println!("  Created:      {}", created.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    if !record.category.holds_secret() {
        println!("\n  Only a public key reference is stored locally.");
    }

    Ok(())
}
