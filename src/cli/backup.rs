//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use clap::Subcommand;

use crate::backup::{list_backups, BackupManager, RestoreManager, RestoreRequest};
use crate::config::settings::Settings;
use crate::display::{format_backup_list, format_validation};
use crate::error::{VaultError, VaultResult};
use crate::storage::Storage;

use super::passphrase::unlock;
use super::Outcome;

/// Backup subcommands
#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Create a new encrypted backup of all credentials
    Create,

    /// List all available backups
    List,

    /// Restore credentials from a backup
    Restore {
        /// Backup file name (".bak" is added when there is no extension)
        #[arg(required_unless_present = "request", conflicts_with = "request")]
        name: Option<String>,

        /// Restore request as JSON, e.g. '{"name": "passwall-..."}'
        #[arg(long)]
        request: Option<String>,
    },

    /// Decrypt a backup and show what it holds, without restoring
    Info {
        /// Backup file name
        name: String,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BackupCommands,
    json: bool,
) -> VaultResult<Outcome> {
    match cmd {
        BackupCommands::Create => {
            let cipher = unlock(settings)?;
            let backup = BackupManager::new(storage, &cipher).create_backup()?;

            Ok(Outcome::success(format!(
                "Backup completed successfully! Created {}",
                backup.name
            )))
        }

        BackupCommands::List => {
            let backups = list_backups(&storage.paths().backup_dir())?;

            if json {
                let listing = serde_json::to_string(&backups)
                    .map_err(|e| VaultError::Json(format!("Failed to serialize listing: {}", e)))?;
                println!("{}", listing);
            } else if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: passwall backup create");
            } else {
                println!("{}", format_backup_list(&backups));
                println!("Total: {} backup(s)", backups.len());
            }

            Ok(Outcome::Printed)
        }

        BackupCommands::Restore { name, request } => {
            let name = match (name, request) {
                (_, Some(body)) => RestoreRequest::from_json(&body)?.name,
                (Some(name), None) => name,
                (None, None) => {
                    return Err(VaultError::InvalidRequest("No backup name given".into()))
                }
            };

            let cipher = unlock(settings)?;
            let result = RestoreManager::new(storage, &cipher).restore(&name)?;
            tracing::debug!("{}", result.summary());

            Ok(Outcome::success(format!(
                "Restore from backup completed successfully! {}",
                result.summary()
            )))
        }

        BackupCommands::Info { name } => {
            let cipher = unlock(settings)?;
            let validation = RestoreManager::new(storage, &cipher).validate_backup(&name)?;

            if json {
                return Ok(Outcome::success(validation.summary()));
            }

            println!("{}", format_validation(&validation));
            Ok(Outcome::Printed)
        }
    }
}
