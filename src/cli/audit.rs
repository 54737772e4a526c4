//! `passwall audit`

use crate::error::{VaultError, VaultResult};
use crate::storage::Storage;

use super::Outcome;

/// Show the most recent audit log entries, oldest first
pub fn handle_audit(storage: &Storage, limit: usize, json: bool) -> VaultResult<Outcome> {
    let log = storage.audit_log();
    let entries = log.read_recent(limit)?;

    if json {
        let listing = serde_json::to_string(&entries)
            .map_err(|e| VaultError::Json(format!("Failed to serialize audit log: {}", e)))?;
        println!("{}", listing);
    } else if entries.is_empty() {
        println!("No audit entries in {}", log.path().display());
    } else {
        for entry in &entries {
            println!("{}", entry.format_human_readable());
        }
    }

    Ok(Outcome::Printed)
}
