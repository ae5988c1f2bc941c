use std::io;

use crate::adapters::prompt::buffered_prompter::BufferedPrompter;
use crate::cli::{context, output};
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::models::delete_intent::DeleteIntent;
use crate::core::services::deletion_service::DeletionService;

/// Execute the `keybox delete` command.
///
/// Prompts are written to stderr and answered on stdin; the final status
/// line goes to stderr as well.
pub fn execute(name: &str, yes: bool, force: bool, legacy: bool) -> Result<()> {
    let home = context::keybox_home();
    let config = AppConfig::load(home)?;

    let store = super::store_helpers::open_store(home, legacy, &config);
    let store_name = store.name().to_string();
    let service = DeletionService { store };

    let intent = DeleteIntent {
        skip_confirmation: yes,
        force_no_passphrase: force,
        use_legacy_store: legacy,
        ..DeleteIntent::new(name)
    };

    let stdin = io::stdin();
    let mut prompter = BufferedPrompter::new(stdin.lock(), io::stderr());
    let deleted = service.delete(&intent, &mut prompter, &mut io::stderr())?;
    super::audit_helpers::log_deletion(home, &config, &store_name, &deleted);

    // The status line goes to stderr; if that failed, stderr is no use.
    if let Some(e) = &deleted.status_error {
        output::warning(&format!(
            "{} was deleted, but the status line could not be written: {e}",
            deleted.record.name
        ));
    }
    output::verbose(&format!(
        "Removed {} from the {store_name} store",
        deleted.record
    ));

    Ok(())
}
