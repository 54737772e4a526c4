//! `passwall migrate`

use crate::error::{VaultError, VaultResult};
use crate::storage::{run_migrations, Storage};

use super::Outcome;

/// Run the additive migrations on every collection
pub fn handle_migrate(storage: &Storage) -> VaultResult<Outcome> {
    let report = run_migrations(storage);

    if !report.all_succeeded() {
        let failed: Vec<String> = report
            .failed
            .iter()
            .map(|(kind, reason)| format!("{} ({})", kind, reason))
            .collect();
        return Err(VaultError::Storage(format!(
            "Migration failed for {}",
            failed.join(", ")
        )));
    }

    Ok(Outcome::success(format!(
        "Migrated {} collections, {} fields added",
        report.succeeded.len(),
        report.fields_added()
    )))
}
