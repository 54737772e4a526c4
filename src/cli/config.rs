//! `passwall config`

use crate::config::{paths::VaultPaths, settings::Settings};
use crate::error::VaultResult;

use super::Outcome;

/// Show current configuration and paths
pub fn handle_config(paths: &VaultPaths, settings: &Settings) -> VaultResult<Outcome> {
    println!("PassWall Configuration");
    println!("======================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Data directory:   {}", paths.data_dir().display());
    println!("Backup directory: {}", paths.backup_dir().display());
    println!("Upload directory: {}", paths.upload_dir().display());
    println!("Audit log:        {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Schema version:   {}", settings.schema_version);
    println!("  Max upload bytes: {}", settings.max_upload_bytes);
    println!(
        "  Initialized:      {}",
        if settings.has_passphrase() { "yes" } else { "no" }
    );

    Ok(Outcome::Printed)
}
